pub mod argentinadatos;
pub mod bcra;
pub mod caching;
pub mod util;

pub use argentinadatos::ArgentinaDatosProvider;
pub use bcra::BcraRatesProvider;
pub use caching::CachingSource;
