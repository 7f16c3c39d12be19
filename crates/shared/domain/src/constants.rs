//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement (sign-up only)
pub const MIN_PASSWORD_LENGTH: u64 = 8;

/// Minimum name length requirement
pub const MIN_NAME_LENGTH: u64 = 1;

pub const MSG_FIRST_NAME_REQUIRED: &str = "first name is required";
pub const MSG_LAST_NAME_REQUIRED: &str = "last name is required";
pub const MSG_INVALID_EMAIL: &str = "please enter a valid email";
pub const MSG_PASSWORD_TOO_SHORT: &str = "password must be at least 8 characters";
pub const MSG_PASSWORD_UPPERCASE: &str = "password must contain at least one uppercase letter";
pub const MSG_PASSWORD_LOWERCASE: &str = "password must contain at least one lowercase letter";
pub const MSG_PASSWORD_DIGIT: &str = "password must contain at least one number";
pub const MSG_PASSWORDS_DO_NOT_MATCH: &str = "passwords do not match";
pub const MSG_PASSWORD_REQUIRED: &str = "password is required";

// =============================================================================
// Registration & Authentication
// =============================================================================

/// Message returned when a sign-up collides with an existing account
pub const MSG_ACCOUNT_EXISTS: &str = "An account with this email already exists";

/// Message returned after a successful sign-up
pub const MSG_ACCOUNT_CREATED: &str = "Account created successfully";

/// Generic sign-in failure, identical for unknown email and wrong password
pub const MSG_INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Default JWT token expiration in hours
pub const DEFAULT_JWT_EXPIRATION_HOURS: i64 = 24;

/// Maximum JWT token expiration in hours (one year)
pub const MAX_JWT_EXPIRATION_HOURS: i64 = 8760;

/// Minimum JWT secret length (security requirement)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// JWT token type identifier
pub const TOKEN_TYPE_BEARER: &str = "Bearer";

// =============================================================================
// Password hashing (argon2id)
// =============================================================================

/// Default argon2 memory cost in KiB
pub const DEFAULT_ARGON2_MEMORY_KIB: u32 = 19_456;

/// Default argon2 iteration count
pub const DEFAULT_ARGON2_ITERATIONS: u32 = 2;

/// Default argon2 degree of parallelism
pub const DEFAULT_ARGON2_PARALLELISM: u32 = 1;
