pub use snare_core::{TrapCatalog, TrapConfig, TrapSystem, World};
pub mod catalog {
    pub use snare_core::catalog::*;
}
pub mod config {
    pub use snare_core::config::*;
}
pub mod effects {
    pub use snare_core::effects::*;
}
pub mod goal {
    pub use snare_core::goal::*;
}
pub mod metrics {
    pub use snare_core::metrics::*;
}
pub mod registry {
    pub use snare_core::registry::*;
}
pub mod scatter {
    pub use snare_core::scatter::*;
}
pub mod spawn {
    pub use snare_core::spawn::*;
}
pub mod system {
    pub use snare_core::system::*;
}
pub mod tagging {
    pub use snare_core::tagging::*;
}
pub mod trigger {
    pub use snare_core::trigger::*;
}
pub mod world {
    pub use snare_core::world::*;
}
pub mod store {
    pub use snare_io::*;
}

pub mod state {
    pub use snare_data::*;
}
