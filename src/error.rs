use thiserror::Error;

/// Reasons a [`SimulationConfig`](crate::config::SimulationConfig) is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{name} restitution must lie in [0, 1], got {value}")]
    Restitution { name: &'static str, value: f32 },
    #[error("{name} friction must be finite and non-negative, got {value}")]
    Friction { name: &'static str, value: f32 },
    #[error("damping must lie in (0, 1], got {0}")]
    Damping(f32),
    #[error("iteration multiplier must be at least 1")]
    IterationMultiplier,
    #[error("gravity must be finite, got {0:?}")]
    Gravity([f32; 3]),
    #[error("spawn range must be finite and positive, got {0}")]
    SpawnRange(f32),
    #[error("frame delta cap must be finite and positive, got {0}")]
    MaxFrameDt(f32),
    #[error("ground height must be finite, got {0}")]
    GroundHeight(f32),
}
