//! Rate conventions: growth compounding and the inflation curve

mod growth;
mod inflation;

pub use growth::Compounding;
pub use inflation::InflationCurve;
