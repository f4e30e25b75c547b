use crate::ui::types::build::BuildError;
use crate::ui::types::choices::{ForgettingChoice, WindowChoice};
use crate::windows::{ForgettingStrategy, Threshold, Window};

/// Builds the training window. Forgetting draws use `seed + 2`.
pub fn build_window(choice: &WindowChoice, seed: u64) -> Result<Window, BuildError> {
    match choice {
        WindowChoice::None(_) => Ok(Window::unbounded()),
        WindowChoice::Sliding(p) => {
            let window = Window::sliding(p.size)?;
            match &p.forgetting {
                Some(f) => Ok(window.with_forgetting(build_forgetting(f, seed.wrapping_add(2)))?),
                None => Ok(window),
            }
        }
        WindowChoice::FixedLength(p) => Ok(Window::fixed_length(p.size)?),
    }
}

fn build_forgetting(choice: &ForgettingChoice, seed: u64) -> Box<dyn ForgettingStrategy> {
    match choice {
        ForgettingChoice::Threshold(p) => Box::new(Threshold::per_class(p.per_class.clone(), seed)),
        ForgettingChoice::FixedThreshold(p) => Box::new(Threshold::fixed(p.min_count, seed)),
    }
}
