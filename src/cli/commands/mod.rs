pub mod codec;
pub mod init;
pub mod run;

pub use codec::*;
pub use init::*;
pub use run::*;
