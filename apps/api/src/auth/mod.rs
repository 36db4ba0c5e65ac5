// Authentication: bcrypt credentials, stateless JWT bearer tokens, and the
// `CurrentUser` extractor every resume route requires.

pub mod account;
pub mod gate;
pub mod handlers;
pub mod password;
pub mod token;

pub use gate::CurrentUser;
pub use password::PasswordHasher;
pub use token::TokenIssuer;
