//--------------------------------------------------------------------------------------------------
// Compile-time role markers
//--------------------------------------------------------------------------------------------------

/// Implemented by zero-sized marker types naming a role, so handlers can demand roles in their
/// signatures (see `extract::RequireRole`)
pub trait Role {
    fn role_id() -> &'static str;
}

//--------------------------------------------------------------------------------------------------
