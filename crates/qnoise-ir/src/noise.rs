//! Noise channel and noise model types.
//!
//! A [`NoiseModel`] describes stochastic errors attached to named gates,
//! plus per-qubit readout misclassification. It travels with a run request
//! and is interpreted by the executing backend; the IR itself stays
//! noise-free.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{IrError, IrResult};

/// A single-qubit error channel.
///
/// Covers the channels relevant to superconducting hardware
/// characterization. Parameters are probabilities (or damping rates) in
/// `[0.0, 1.0]`; use the validating constructors rather than building
/// variants directly when the value comes from user input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ErrorChannel {
    /// Depolarizing channel: with probability `p`, replaces the state
    /// with the maximally mixed state.
    Depolarizing {
        /// Error probability (0.0 to 1.0).
        p: f64,
    },

    /// Amplitude damping: models energy relaxation (T1 decay).
    AmplitudeDamping {
        /// Damping parameter (0.0 to 1.0).
        gamma: f64,
    },

    /// Phase damping: models dephasing (T2 decay without energy loss).
    PhaseDamping {
        /// Dephasing parameter (0.0 to 1.0).
        gamma: f64,
    },

    /// Bit-flip channel: flips |0⟩ ↔ |1⟩ with probability `p`.
    BitFlip {
        /// Flip probability (0.0 to 1.0).
        p: f64,
    },

    /// Readout error: measurement reports the wrong outcome with
    /// probability `p`.
    ReadoutError {
        /// Misclassification probability (0.0 to 1.0).
        p: f64,
    },
}

fn check_unit_interval(param: &'static str, value: f64) -> IrResult<f64> {
    if !(0.0..=1.0).contains(&value) || value.is_nan() {
        return Err(IrError::invalid_parameter(
            param,
            format!("{value} is outside [0, 1]"),
        ));
    }
    Ok(value)
}

impl ErrorChannel {
    /// Create a depolarizing channel.
    pub fn depolarizing(p: f64) -> IrResult<Self> {
        Ok(ErrorChannel::Depolarizing {
            p: check_unit_interval("p", p)?,
        })
    }

    /// Create an amplitude damping channel.
    pub fn amplitude_damping(gamma: f64) -> IrResult<Self> {
        Ok(ErrorChannel::AmplitudeDamping {
            gamma: check_unit_interval("gamma", gamma)?,
        })
    }

    /// Create a phase damping channel.
    pub fn phase_damping(gamma: f64) -> IrResult<Self> {
        Ok(ErrorChannel::PhaseDamping {
            gamma: check_unit_interval("gamma", gamma)?,
        })
    }

    /// Create a bit-flip channel.
    pub fn bit_flip(p: f64) -> IrResult<Self> {
        Ok(ErrorChannel::BitFlip {
            p: check_unit_interval("p", p)?,
        })
    }

    /// Create a readout error channel.
    pub fn readout_error(p: f64) -> IrResult<Self> {
        Ok(ErrorChannel::ReadoutError {
            p: check_unit_interval("p", p)?,
        })
    }

    /// Get a human-readable name for this channel.
    pub fn name(&self) -> &'static str {
        match self {
            ErrorChannel::Depolarizing { .. } => "depolarizing",
            ErrorChannel::AmplitudeDamping { .. } => "amplitude_damping",
            ErrorChannel::PhaseDamping { .. } => "phase_damping",
            ErrorChannel::BitFlip { .. } => "bit_flip",
            ErrorChannel::ReadoutError { .. } => "readout_error",
        }
    }

    /// Get the primary error parameter of this channel.
    pub fn error_param(&self) -> f64 {
        match self {
            ErrorChannel::Depolarizing { p }
            | ErrorChannel::BitFlip { p }
            | ErrorChannel::ReadoutError { p } => *p,
            ErrorChannel::AmplitudeDamping { gamma } | ErrorChannel::PhaseDamping { gamma } => {
                *gamma
            }
        }
    }

    /// A channel with parameter zero never alters the state.
    pub fn is_trivial(&self) -> bool {
        self.error_param() == 0.0
    }
}

impl std::fmt::Display for ErrorChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorChannel::Depolarizing { p } => write!(f, "depolarizing(p={p:.4})"),
            ErrorChannel::AmplitudeDamping { gamma } => {
                write!(f, "amplitude_damping(γ={gamma:.4})")
            }
            ErrorChannel::PhaseDamping { gamma } => write!(f, "phase_damping(γ={gamma:.4})"),
            ErrorChannel::BitFlip { p } => write!(f, "bit_flip(p={p:.4})"),
            ErrorChannel::ReadoutError { p } => write!(f, "readout_error(p={p:.4})"),
        }
    }
}

/// A noise model: error channels keyed by gate name, plus readout errors.
///
/// The executing backend samples the channel after every occurrence of the
/// named gate, independently on each operand qubit. Readout errors flip
/// measured bits at sampling time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NoiseModel {
    /// Per-gate error channels, keyed by gate name (e.g., "h").
    #[serde(default)]
    gate_channels: BTreeMap<String, ErrorChannel>,

    /// Gate names this model was characterized against.
    #[serde(default)]
    basis_gates: Vec<String>,

    /// Readout error probability per qubit.
    #[serde(default)]
    readout_errors: Option<Vec<f64>>,
}

impl NoiseModel {
    /// Create an empty (ideal) noise model.
    pub fn ideal() -> Self {
        Self::default()
    }

    /// Create a model that attaches one channel to every occurrence of a
    /// single gate, on every qubit.
    pub fn uniform(gate: impl Into<String>, channel: ErrorChannel) -> Self {
        let gate = gate.into();
        let mut gate_channels = BTreeMap::new();
        gate_channels.insert(gate.clone(), channel);
        Self {
            gate_channels,
            basis_gates: vec![gate],
            readout_errors: None,
        }
    }

    /// Attach a channel to a gate name.
    #[must_use]
    pub fn with_channel(mut self, gate: impl Into<String>, channel: ErrorChannel) -> Self {
        let gate = gate.into();
        if !self.basis_gates.contains(&gate) {
            self.basis_gates.push(gate.clone());
        }
        self.gate_channels.insert(gate, channel);
        self
    }

    /// Attach per-qubit readout error probabilities.
    #[must_use]
    pub fn with_readout_errors(mut self, errors: Vec<f64>) -> Self {
        self.readout_errors = Some(errors);
        self
    }

    /// Get the channel attached to a gate, if any.
    pub fn channel_for(&self, gate_name: &str) -> Option<&ErrorChannel> {
        self.gate_channels.get(gate_name)
    }

    /// Get the readout error for a specific qubit, if known.
    pub fn qubit_readout_error(&self, qubit_index: usize) -> Option<f64> {
        self.readout_errors
            .as_ref()
            .and_then(|v| v.get(qubit_index))
            .copied()
    }

    /// Gate names this model was characterized against.
    pub fn basis_gates(&self) -> &[String] {
        &self.basis_gates
    }

    /// Iterate over (gate name, channel) pairs.
    pub fn channels(&self) -> impl Iterator<Item = (&String, &ErrorChannel)> {
        self.gate_channels.iter()
    }

    /// Check if this model has any noise data at all.
    pub fn is_empty(&self) -> bool {
        self.gate_channels.is_empty() && self.readout_errors.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_channel_names() {
        assert_eq!(
            ErrorChannel::depolarizing(0.01).unwrap().name(),
            "depolarizing"
        );
        assert_eq!(
            ErrorChannel::amplitude_damping(0.02).unwrap().name(),
            "amplitude_damping"
        );
        assert_eq!(
            ErrorChannel::readout_error(0.05).unwrap().name(),
            "readout_error"
        );
    }

    #[test]
    fn test_channel_display() {
        let c = ErrorChannel::depolarizing(0.03).unwrap();
        assert_eq!(format!("{c}"), "depolarizing(p=0.0300)");
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert!(ErrorChannel::depolarizing(-0.1).is_err());
        assert!(ErrorChannel::phase_damping(1.5).is_err());
        assert!(ErrorChannel::bit_flip(f64::NAN).is_err());
    }

    #[test]
    fn test_zero_parameter_is_trivial() {
        assert!(ErrorChannel::depolarizing(0.0).unwrap().is_trivial());
        assert!(!ErrorChannel::depolarizing(0.003).unwrap().is_trivial());
    }

    #[test]
    fn test_uniform_model_targets_one_gate() {
        let channel = ErrorChannel::depolarizing(0.003).unwrap();
        let model = NoiseModel::uniform("h", channel);

        assert_eq!(model.channel_for("h"), Some(&channel));
        assert_eq!(model.channel_for("x"), None);
        assert_eq!(model.channel_for("cx"), None);
        assert_eq!(model.basis_gates(), ["h".to_string()]);
    }

    #[test]
    fn test_ideal_model_is_empty() {
        let model = NoiseModel::ideal();
        assert!(model.is_empty());
        assert_eq!(model.channel_for("h"), None);
        assert_eq!(model.qubit_readout_error(0), None);
    }

    #[test]
    fn test_readout_errors() {
        let model = NoiseModel::ideal().with_readout_errors(vec![0.02, 0.03]);
        assert_eq!(model.qubit_readout_error(0), Some(0.02));
        assert_eq!(model.qubit_readout_error(1), Some(0.03));
        assert_eq!(model.qubit_readout_error(5), None);
        assert!(!model.is_empty());
    }

    #[test]
    fn test_model_serialization() {
        let model = NoiseModel::uniform("h", ErrorChannel::depolarizing(0.01).unwrap())
            .with_readout_errors(vec![0.02]);

        let json = serde_json::to_string(&model).unwrap();
        let deserialized: NoiseModel = serde_json::from_str(&json).unwrap();

        assert_eq!(
            deserialized.channel_for("h"),
            Some(&ErrorChannel::Depolarizing { p: 0.01 })
        );
        assert_eq!(deserialized.qubit_readout_error(0), Some(0.02));
    }

    proptest! {
        #[test]
        fn prop_constructors_accept_unit_interval(p in 0.0f64..=1.0) {
            prop_assert!(ErrorChannel::depolarizing(p).is_ok());
            prop_assert!(ErrorChannel::amplitude_damping(p).is_ok());
            prop_assert!(ErrorChannel::phase_damping(p).is_ok());
            prop_assert!(ErrorChannel::bit_flip(p).is_ok());
            prop_assert!(ErrorChannel::readout_error(p).is_ok());
        }

        #[test]
        fn prop_constructors_reject_outside(p in 1.0f64..100.0) {
            // Strictly above 1.0; 1.0 itself is valid.
            prop_assume!(p > 1.0);
            prop_assert!(ErrorChannel::depolarizing(p).is_err());
            prop_assert!(ErrorChannel::depolarizing(-p).is_err());
        }
    }
}
