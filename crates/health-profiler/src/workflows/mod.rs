pub mod assessment;
pub mod intake;
pub mod personalization;
pub mod profiles;
