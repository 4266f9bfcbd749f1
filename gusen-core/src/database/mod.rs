pub mod memory;
pub mod ports;
#[cfg(feature = "database")]
pub mod postgres;

pub use memory::{
    InMemoryCityStore, InMemoryClientStore, InMemoryLogStore, InMemoryUserStore,
};
pub use ports::{CityStore, ClientStore, LogStore, UserStore};
