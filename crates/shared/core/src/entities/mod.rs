mod classification;
mod norms;
mod switch_code;
mod timing;

pub use classification::Classification;
pub use norms::{CategoryNorms, CategorySet, NormRow};
pub use switch_code::SwitchCode;
pub use timing::{TimingClassification, TimingCode};
