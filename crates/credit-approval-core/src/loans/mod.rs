pub mod limit;
pub mod origination;
pub mod statement;
