pub mod constants;
pub mod native;
pub mod spl;
pub mod transaction;

pub use constants::SOL_MINT;
pub use native::native_holding;
pub use spl::{token_holdings, TokenAccount};
pub use transaction::{decode_transaction, sign_transaction};
