mod result;

pub use result::EnchantedResult;
