//! Python bindings for the recall engine.
//!
//! Lets a Python presentation layer drive the engine.
//!
//! # Quick Start
//!
//! ```python
//! import recall_engine as re
//!
//! engine = re.GameEngine(seed=42)
//! engine.start()
//! engine.advance(2000)          # one-symbol reveal plays out
//! engine.submit(engine.sequence[0])
//! assert engine.score == 1
//! ```

use pyo3::prelude::*;

mod py_engine;

pub use py_engine::*;

/// recall_engine: a sequence-memory game engine.
#[pymodule]
fn recall_engine(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyGameEngine>()?;
    Ok(())
}
