//! Statevector simulation engine with trajectory noise.
//!
//! Noise is applied stochastically per trajectory: each shot replays the
//! circuit on a fresh statevector, and after each gate carrying an error
//! channel the channel is sampled independently on every operand qubit.
//! Averaged over shots this reproduces the channel's density-matrix
//! action without ever materializing a density matrix.

use num_complex::Complex64;
use rand::Rng;
use std::f64::consts::PI;

use qnoise_ir::{ErrorChannel, Instruction, InstructionKind, StandardGate};

/// A statevector representing a quantum state.
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: usize,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    pub fn new(num_qubits: usize) -> Self {
        let size = 1 << num_qubits;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); size];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Apply an instruction to the statevector.
    pub fn apply(&mut self, instruction: &Instruction) {
        match &instruction.kind {
            InstructionKind::Gate(gate) => {
                let qubits: Vec<_> = instruction.qubits.iter().map(|q| q.0 as usize).collect();
                self.apply_gate(gate, &qubits);
            }
            InstructionKind::Reset => {
                let qubit = instruction.qubits[0].0 as usize;
                self.reset(qubit);
            }
            InstructionKind::Measure | InstructionKind::Barrier => {
                // These don't modify the statevector in simulation
            }
        }
    }

    /// Apply a standard gate to specific qubits.
    fn apply_gate(&mut self, gate: &StandardGate, qubits: &[usize]) {
        match gate {
            StandardGate::I => {}
            StandardGate::X => self.apply_x(qubits[0]),
            StandardGate::Y => self.apply_y(qubits[0]),
            StandardGate::Z => self.apply_z(qubits[0]),
            StandardGate::H => self.apply_h(qubits[0]),
            StandardGate::S => self.apply_phase(qubits[0], PI / 2.0),
            StandardGate::Sdg => self.apply_phase(qubits[0], -PI / 2.0),
            StandardGate::SX => self.apply_rx(qubits[0], PI / 2.0),
            StandardGate::Rx(theta) => self.apply_rx(qubits[0], *theta),
            StandardGate::Ry(theta) => self.apply_ry(qubits[0], *theta),
            StandardGate::Rz(theta) => self.apply_rz(qubits[0], *theta),
            StandardGate::P(theta) => self.apply_phase(qubits[0], *theta),
            StandardGate::CX => self.apply_cx(qubits[0], qubits[1]),
            StandardGate::CZ => self.apply_mcz(qubits),
            StandardGate::CP(theta) => self.apply_cp(qubits[0], qubits[1], *theta),
            StandardGate::Swap => self.apply_swap(qubits[0], qubits[1]),
            StandardGate::CCX => self.apply_ccx(qubits[0], qubits[1], qubits[2]),
            StandardGate::Mcz { .. } => self.apply_mcz(qubits),
        }
    }

    // =========================================================================
    // Single-qubit gate implementations
    // =========================================================================

    fn apply_x(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                let j = i | mask;
                self.amplitudes.swap(i, j);
            }
        }
    }

    fn apply_y(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        let i_val = Complex64::new(0.0, 1.0);
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                let j = i | mask;
                let tmp = self.amplitudes[i];
                self.amplitudes[i] = -i_val * self.amplitudes[j];
                self.amplitudes[j] = i_val * tmp;
            }
        }
    }

    fn apply_z(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        for i in 0..(1 << self.num_qubits) {
            if i & mask != 0 {
                self.amplitudes[i] = -self.amplitudes[i];
            }
        }
    }

    fn apply_h(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = sqrt2_inv * (a + b);
                self.amplitudes[j] = sqrt2_inv * (a - b);
            }
        }
    }

    fn apply_phase(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let phase = Complex64::from_polar(1.0, theta);
        for i in 0..(1 << self.num_qubits) {
            if i & mask != 0 {
                self.amplitudes[i] *= phase;
            }
        }
    }

    fn apply_rx(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        let neg_i_s = Complex64::new(0.0, -s);
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = c * a + neg_i_s * b;
                self.amplitudes[j] = neg_i_s * a + c * b;
            }
        }
    }

    fn apply_ry(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = c * a - s * b;
                self.amplitudes[j] = s * a + c * b;
            }
        }
    }

    fn apply_rz(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let phase_0 = Complex64::from_polar(1.0, -theta / 2.0);
        let phase_1 = Complex64::from_polar(1.0, theta / 2.0);
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                self.amplitudes[i] *= phase_0;
            } else {
                self.amplitudes[i] *= phase_1;
            }
        }
    }

    // =========================================================================
    // Multi-qubit gate implementations
    // =========================================================================

    fn apply_cx(&mut self, control: usize, target: usize) {
        let ctrl_mask = 1 << control;
        let tgt_mask = 1 << target;
        for i in 0..(1 << self.num_qubits) {
            if (i & ctrl_mask != 0) && (i & tgt_mask == 0) {
                let j = i | tgt_mask;
                self.amplitudes.swap(i, j);
            }
        }
    }

    fn apply_cp(&mut self, control: usize, target: usize, theta: f64) {
        let ctrl_mask = 1 << control;
        let tgt_mask = 1 << target;
        let phase = Complex64::from_polar(1.0, theta);
        for i in 0..(1 << self.num_qubits) {
            if (i & ctrl_mask != 0) && (i & tgt_mask != 0) {
                self.amplitudes[i] *= phase;
            }
        }
    }

    fn apply_swap(&mut self, q1: usize, q2: usize) {
        let mask1 = 1 << q1;
        let mask2 = 1 << q2;
        for i in 0..(1 << self.num_qubits) {
            let b1 = (i & mask1) != 0;
            let b2 = (i & mask2) != 0;
            if b1 && !b2 {
                let j = (i & !mask1) | mask2;
                self.amplitudes.swap(i, j);
            }
        }
    }

    fn apply_ccx(&mut self, c1: usize, c2: usize, target: usize) {
        let c1_mask = 1 << c1;
        let c2_mask = 1 << c2;
        let tgt_mask = 1 << target;
        for i in 0..(1 << self.num_qubits) {
            if (i & c1_mask != 0) && (i & c2_mask != 0) && (i & tgt_mask == 0) {
                let j = i | tgt_mask;
                self.amplitudes.swap(i, j);
            }
        }
    }

    /// Flip the sign of every basis state with all operand qubits set.
    ///
    /// Handles CZ (2 qubits), the general multi-controlled Z, and the
    /// degenerate single-qubit case (plain Z).
    fn apply_mcz(&mut self, qubits: &[usize]) {
        let mask: usize = qubits.iter().map(|&q| 1usize << q).sum();
        for i in 0..(1 << self.num_qubits) {
            if i & mask == mask {
                self.amplitudes[i] = -self.amplitudes[i];
            }
        }
    }

    fn reset(&mut self, qubit: usize) {
        // Project to |0⟩ and renormalize
        let mask = 1 << qubit;
        for i in 0..(1 << self.num_qubits) {
            if i & mask != 0 {
                let j = i & !mask;
                let val = self.amplitudes[i];
                self.amplitudes[j] += val;
                self.amplitudes[i] = Complex64::new(0.0, 0.0);
            }
        }
        self.renormalize();
    }

    // =========================================================================
    // Noise channels (trajectory sampling)
    // =========================================================================

    /// Sample one trajectory of an error channel on one qubit.
    ///
    /// `ReadoutError` does not act on the state; it is applied to the
    /// sampled outcome by the caller at measurement time.
    pub fn apply_channel(&mut self, qubit: usize, channel: &ErrorChannel, rng: &mut impl Rng) {
        match channel {
            ErrorChannel::Depolarizing { p } => {
                let r: f64 = rng.r#gen();
                if r < p / 4.0 {
                    self.apply_x(qubit);
                } else if r < p / 2.0 {
                    self.apply_y(qubit);
                } else if r < 3.0 * p / 4.0 {
                    self.apply_z(qubit);
                }
            }
            ErrorChannel::BitFlip { p } => {
                if rng.r#gen::<f64>() < *p {
                    self.apply_x(qubit);
                }
            }
            ErrorChannel::AmplitudeDamping { gamma } => {
                let p_jump = gamma * self.prob_one(qubit);
                if rng.r#gen::<f64>() < p_jump {
                    // Jump: |1⟩ decays to |0⟩
                    let mask = 1 << qubit;
                    for i in 0..(1 << self.num_qubits) {
                        if i & mask != 0 {
                            let j = i & !mask;
                            self.amplitudes[j] = self.amplitudes[i];
                            self.amplitudes[i] = Complex64::new(0.0, 0.0);
                        }
                    }
                } else {
                    // No jump: |1⟩ amplitude shrinks by √(1−γ)
                    self.scale_one_subspace(qubit, (1.0 - gamma).sqrt());
                }
                self.renormalize();
            }
            ErrorChannel::PhaseDamping { gamma } => {
                let p_jump = gamma * self.prob_one(qubit);
                if rng.r#gen::<f64>() < p_jump {
                    // Jump: project onto |1⟩
                    let mask = 1 << qubit;
                    for i in 0..(1 << self.num_qubits) {
                        if i & mask == 0 {
                            self.amplitudes[i] = Complex64::new(0.0, 0.0);
                        }
                    }
                } else {
                    self.scale_one_subspace(qubit, (1.0 - gamma).sqrt());
                }
                self.renormalize();
            }
            // ReadoutError acts at sampling time, applied to the measured
            // outcome by the caller; channel kinds this engine does not
            // model leave the state untouched.
            _ => {}
        }
    }

    /// Probability of measuring |1⟩ on a qubit.
    pub fn prob_one(&self, qubit: usize) -> f64 {
        let mask = 1 << qubit;
        self.amplitudes
            .iter()
            .enumerate()
            .filter(|(i, _)| i & mask != 0)
            .map(|(_, amp)| amp.norm_sqr())
            .sum()
    }

    fn scale_one_subspace(&mut self, qubit: usize, factor: f64) {
        let mask = 1 << qubit;
        for i in 0..(1 << self.num_qubits) {
            if i & mask != 0 {
                self.amplitudes[i] *= factor;
            }
        }
    }

    fn renormalize(&mut self) {
        let norm = self
            .amplitudes
            .iter()
            .map(num_complex::Complex::norm_sqr)
            .sum::<f64>()
            .sqrt();
        if norm > 0.0 {
            for amp in &mut self.amplitudes {
                *amp /= norm;
            }
        }
    }

    // =========================================================================
    // Measurement
    // =========================================================================

    /// Sample a measurement outcome.
    pub fn sample(&self, rng: &mut impl Rng) -> usize {
        let r: f64 = rng.r#gen();

        let mut cumulative = 0.0;
        for (i, amp) in self.amplitudes.iter().enumerate() {
            cumulative += amp.norm_sqr();
            if r < cumulative {
                return i;
            }
        }

        // Fallback (shouldn't happen with normalized states)
        self.amplitudes.len() - 1
    }

    /// Convert a measurement outcome to a bitstring.
    ///
    /// Rightmost character corresponds to qubit 0 (OpenQASM 3 ordering),
    /// which plain binary formatting already produces.
    pub fn outcome_to_bitstring(&self, outcome: usize) -> String {
        format!("{:0width$b}", outcome, width = self.num_qubits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn approx_eq(a: Complex64, b: Complex64) -> bool {
        (a - b).norm() < 1e-10
    }

    #[test]
    fn test_initial_state() {
        let sv = Statevector::new(2);
        assert!(approx_eq(sv.amplitudes[0], Complex64::new(1.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[1], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[2], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[3], Complex64::new(0.0, 0.0)));
    }

    #[test]
    fn test_hadamard() {
        let mut sv = Statevector::new(1);
        sv.apply_h(0);

        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        assert!(approx_eq(sv.amplitudes[0], Complex64::new(sqrt2_inv, 0.0)));
        assert!(approx_eq(sv.amplitudes[1], Complex64::new(sqrt2_inv, 0.0)));
    }

    #[test]
    fn test_bell_state() {
        let mut sv = Statevector::new(2);
        sv.apply_h(0);
        sv.apply_cx(0, 1);

        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        assert!(approx_eq(sv.amplitudes[0], Complex64::new(sqrt2_inv, 0.0)));
        assert!(approx_eq(sv.amplitudes[1], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[2], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[3], Complex64::new(sqrt2_inv, 0.0)));
    }

    #[test]
    fn test_mcz_flips_all_ones_only() {
        // Uniform 2-qubit superposition, MCZ on both qubits
        let mut sv = Statevector::new(2);
        sv.apply_h(0);
        sv.apply_h(1);
        sv.apply_mcz(&[0, 1]);

        assert!(sv.amplitudes[0].re > 0.0);
        assert!(sv.amplitudes[1].re > 0.0);
        assert!(sv.amplitudes[2].re > 0.0);
        assert!(sv.amplitudes[3].re < 0.0);
    }

    #[test]
    fn test_mcz_single_qubit_is_z() {
        let mut a = Statevector::new(1);
        a.apply_h(0);
        a.apply_mcz(&[0]);

        let mut b = Statevector::new(1);
        b.apply_h(0);
        b.apply_z(0);

        assert!(approx_eq(a.amplitudes[0], b.amplitudes[0]));
        assert!(approx_eq(a.amplitudes[1], b.amplitudes[1]));
    }

    #[test]
    fn test_sample_deterministic() {
        // |1⟩ state should always sample to 1
        let mut sv = Statevector::new(1);
        sv.apply_x(0);

        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            assert_eq!(sv.sample(&mut rng), 1);
        }
    }

    #[test]
    fn test_bitstring_rightmost_is_qubit_zero() {
        // |q1 q0⟩ = |01⟩: qubit 0 set, qubit 1 clear
        let mut sv = Statevector::new(2);
        sv.apply_x(0);

        let mut rng = StdRng::seed_from_u64(7);
        let outcome = sv.sample(&mut rng);
        assert_eq!(sv.outcome_to_bitstring(outcome), "01");
    }

    #[test]
    fn test_amplitude_damping_full_decay() {
        // γ = 1 on |1⟩ always jumps back to |0⟩
        let mut sv = Statevector::new(1);
        sv.apply_x(0);

        let channel = ErrorChannel::amplitude_damping(1.0).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        sv.apply_channel(0, &channel, &mut rng);

        assert!((sv.prob_one(0)).abs() < 1e-10);
    }

    #[test]
    fn test_trivial_channel_preserves_state() {
        let mut sv = Statevector::new(2);
        sv.apply_h(0);
        sv.apply_cx(0, 1);
        let before: Vec<_> = sv.amplitudes.clone();

        let mut rng = StdRng::seed_from_u64(7);
        for channel in [
            ErrorChannel::depolarizing(0.0).unwrap(),
            ErrorChannel::amplitude_damping(0.0).unwrap(),
            ErrorChannel::phase_damping(0.0).unwrap(),
            ErrorChannel::bit_flip(0.0).unwrap(),
        ] {
            sv.apply_channel(0, &channel, &mut rng);
            sv.apply_channel(1, &channel, &mut rng);
        }

        for (a, b) in sv.amplitudes.iter().zip(before.iter()) {
            assert!(approx_eq(*a, *b));
        }
    }

    #[test]
    fn test_readout_channel_leaves_state_untouched() {
        // Readout misclassification is applied to the sampled outcome,
        // never to the amplitudes, even at probability 1
        let mut sv = Statevector::new(2);
        sv.apply_h(0);
        sv.apply_cx(0, 1);
        let before: Vec<_> = sv.amplitudes.clone();

        let channel = ErrorChannel::readout_error(1.0).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        sv.apply_channel(0, &channel, &mut rng);
        sv.apply_channel(1, &channel, &mut rng);

        for (a, b) in sv.amplitudes.iter().zip(before.iter()) {
            assert!(approx_eq(*a, *b));
        }
    }

    #[test]
    fn test_phase_damping_keeps_state_normalized() {
        let channel = ErrorChannel::phase_damping(0.4).unwrap();

        // Both trajectory branches must leave a unit-norm state.
        for seed in 0..20 {
            let mut sv = Statevector::new(1);
            sv.apply_h(0);
            let mut rng = StdRng::seed_from_u64(seed);
            sv.apply_channel(0, &channel, &mut rng);

            let norm: f64 = sv.amplitudes.iter().map(Complex64::norm_sqr).sum();
            assert!((norm - 1.0).abs() < 1e-10);
        }
    }
}
