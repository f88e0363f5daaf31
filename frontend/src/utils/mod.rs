pub mod notice;
#[cfg(target_arch = "wasm32")]
pub mod storage;
pub mod time;
