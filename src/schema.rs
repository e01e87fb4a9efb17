//! Layout of the `contacts` table. The table itself is created by `migrations/`.

pub const FIRST_NAME_MAX: usize = 48;
pub const LAST_NAME_MAX: usize = 48;
pub const ADDRESS_MAX: usize = 48;
pub const PHONE_MAX: usize = 24;

pub const SELECT_ALL: &str =
    "SELECT id, first_name, last_name, address, phone FROM contacts ORDER BY id";

pub const SELECT_BY_ID: &str =
    "SELECT id, first_name, last_name, address, phone FROM contacts WHERE id = $1";

// NULL binds act as wildcards. Two rows are enough to tell "one" from "many".
pub const SELECT_BY_FIELDS: &str = "SELECT id, first_name, last_name, address, phone \
     FROM contacts \
     WHERE ($1::text IS NULL OR first_name = $1) \
       AND ($2::text IS NULL OR last_name = $2) \
       AND ($3::text IS NULL OR address = $3) \
       AND ($4::text IS NULL OR phone = $4) \
     ORDER BY id LIMIT 2";

// strpos keeps the match literal and case-sensitive, unlike LIKE patterns.
pub const SELECT_MATCHING: &str = "SELECT id, first_name, last_name, address, phone \
     FROM contacts \
     WHERE strpos(first_name, $1) > 0 \
        OR strpos(last_name, $1) > 0 \
        OR strpos(address, $1) > 0 \
        OR strpos(phone, $1) > 0 \
     ORDER BY id";

pub const PHONE_EXISTS: &str = "SELECT EXISTS(SELECT 1 FROM contacts WHERE phone = $1)";

pub const ID_EXISTS: &str = "SELECT EXISTS(SELECT 1 FROM contacts WHERE id = $1)";

pub const INSERT: &str = "INSERT INTO contacts (first_name, last_name, address, phone) \
     VALUES ($1, $2, $3, $4) \
     RETURNING id, first_name, last_name, address, phone";

pub const UPDATE: &str = "UPDATE contacts \
     SET first_name = $2, last_name = $3, address = $4, phone = $5 \
     WHERE id = $1";

pub const DELETE: &str = "DELETE FROM contacts WHERE id = $1 \
     RETURNING id, first_name, last_name, address, phone";
