use tokenauth::Role;

//--------------------------------------------------------------------------------------------------
// Roles understood by the server
//--------------------------------------------------------------------------------------------------

pub struct UserRole;

impl Role for UserRole {
    fn role_id() -> &'static str {
        "ROLE_USER"
    }
}

pub struct AdminRole;

impl Role for AdminRole {
    fn role_id() -> &'static str {
        "ROLE_ADMIN"
    }
}

//--------------------------------------------------------------------------------------------------
