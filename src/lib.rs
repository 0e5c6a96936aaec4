pub use multibit::*;
