mod engine_state;
mod stream_engine;

pub use engine_state::EngineState;
pub use stream_engine::StreamEngine;
