//! High-level circuit builder API.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::instruction::{Instruction, InstructionKind};
use crate::qubit::{ClbitId, QubitId};

/// A quantum circuit.
///
/// An ordered sequence of instructions over a fixed set of qubits and
/// classical bits. Built mutably through the fluent gate methods, executed
/// immutably by a backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Number of qubits.
    num_qubits: u32,
    /// Number of classical bits.
    num_clbits: u32,
    /// Instructions in application order.
    instructions: Vec<Instruction>,
}

impl Circuit {
    /// Create a new empty circuit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            num_qubits: 0,
            num_clbits: 0,
            instructions: vec![],
        }
    }

    /// Create a circuit with a given number of qubits and classical bits.
    pub fn with_size(name: impl Into<String>, num_qubits: u32, num_clbits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            num_clbits,
            instructions: vec![],
        }
    }

    /// Add a single qubit to the circuit.
    pub fn add_qubit(&mut self) -> QubitId {
        let id = QubitId(self.num_qubits);
        self.num_qubits += 1;
        id
    }

    /// Add a single classical bit to the circuit.
    pub fn add_clbit(&mut self) -> ClbitId {
        let id = ClbitId(self.num_clbits);
        self.num_clbits += 1;
        id
    }

    /// Validate operands and append an instruction.
    fn push(&mut self, inst: Instruction) -> IrResult<()> {
        let gate_name = || Some(inst.name().to_string());
        for (i, q) in inst.qubits.iter().enumerate() {
            if q.0 >= self.num_qubits {
                return Err(IrError::QubitNotFound {
                    qubit: *q,
                    gate_name: gate_name(),
                });
            }
            if inst.qubits[..i].contains(q) {
                return Err(IrError::DuplicateQubit {
                    qubit: *q,
                    gate_name: gate_name(),
                });
            }
        }
        for c in &inst.clbits {
            if c.0 >= self.num_clbits {
                return Err(IrError::ClbitNotFound {
                    clbit: *c,
                    gate_name: gate_name(),
                });
            }
        }
        if let InstructionKind::Gate(gate) = &inst.kind {
            let expected = gate.num_qubits();
            let got = u32::try_from(inst.qubits.len()).unwrap_or(u32::MAX);
            if expected != got {
                return Err(IrError::QubitCountMismatch {
                    gate_name: gate.name().to_string(),
                    expected,
                    got,
                });
            }
        }
        self.instructions.push(inst);
        Ok(())
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(StandardGate::H, qubit))?;
        Ok(self)
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(StandardGate::X, qubit))?;
        Ok(self)
    }

    /// Apply Pauli-Y gate.
    pub fn y(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(StandardGate::Y, qubit))?;
        Ok(self)
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(StandardGate::Z, qubit))?;
        Ok(self)
    }

    /// Apply S gate.
    pub fn s(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(StandardGate::S, qubit))?;
        Ok(self)
    }

    /// Apply S-dagger gate.
    pub fn sdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(StandardGate::Sdg, qubit))?;
        Ok(self)
    }

    /// Apply sqrt(X) gate.
    pub fn sx(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(StandardGate::SX, qubit))?;
        Ok(self)
    }

    /// Apply Rx rotation gate.
    pub fn rx(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(
            StandardGate::Rx(theta),
            qubit,
        ))?;
        Ok(self)
    }

    /// Apply Ry rotation gate.
    pub fn ry(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(
            StandardGate::Ry(theta),
            qubit,
        ))?;
        Ok(self)
    }

    /// Apply Rz rotation gate.
    pub fn rz(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(
            StandardGate::Rz(theta),
            qubit,
        ))?;
        Ok(self)
    }

    /// Apply phase gate.
    pub fn p(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(StandardGate::P(theta), qubit))?;
        Ok(self)
    }

    // =========================================================================
    // Two-qubit gates
    // =========================================================================

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::two_qubit_gate(StandardGate::CX, control, target))?;
        Ok(self)
    }

    /// Apply CZ gate.
    pub fn cz(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::two_qubit_gate(StandardGate::CZ, control, target))?;
        Ok(self)
    }

    /// Apply controlled-phase gate.
    pub fn cp(&mut self, theta: f64, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::two_qubit_gate(
            StandardGate::CP(theta),
            control,
            target,
        ))?;
        Ok(self)
    }

    /// Apply SWAP gate.
    pub fn swap(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::two_qubit_gate(StandardGate::Swap, q1, q2))?;
        Ok(self)
    }

    // =========================================================================
    // Multi-qubit gates
    // =========================================================================

    /// Apply Toffoli (CCX) gate.
    pub fn ccx(&mut self, c1: QubitId, c2: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::gate(StandardGate::CCX, [c1, c2, target]))?;
        Ok(self)
    }

    /// Apply a multi-controlled Z over the given qubits.
    ///
    /// The last qubit is the nominal target, but MCZ is symmetric in its
    /// operands. With a single qubit this is plain `Z`.
    pub fn mcz(&mut self, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<&mut Self> {
        let qubits: Vec<_> = qubits.into_iter().collect();
        if qubits.is_empty() {
            return Err(IrError::invalid_parameter(
                "qubits",
                "mcz requires at least one qubit",
            ));
        }
        let controls = u32::try_from(qubits.len() - 1).unwrap_or(u32::MAX);
        self.push(Instruction::gate(StandardGate::Mcz { controls }, qubits))?;
        Ok(self)
    }

    // =========================================================================
    // Other operations
    // =========================================================================

    /// Measure a qubit to a classical bit.
    pub fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> IrResult<&mut Self> {
        self.push(Instruction::measure(qubit, clbit))?;
        Ok(self)
    }

    /// Measure all qubits to corresponding classical bits.
    ///
    /// Classical bits are added as needed so that every qubit has one.
    pub fn measure_all(&mut self) -> IrResult<&mut Self> {
        while self.num_clbits < self.num_qubits {
            self.add_clbit();
        }

        let qubits: Vec<_> = (0..self.num_qubits).map(QubitId).collect();
        let clbits: Vec<_> = (0..self.num_qubits).map(ClbitId).collect();

        let inst = Instruction::measure_all(qubits, clbits)?;
        self.push(inst)?;
        Ok(self)
    }

    /// Reset a qubit to |0⟩.
    pub fn reset(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::reset(qubit))?;
        Ok(self)
    }

    /// Apply a barrier to specified qubits.
    pub fn barrier(&mut self, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<&mut Self> {
        self.push(Instruction::barrier(qubits))?;
        Ok(self)
    }

    /// Apply a barrier to all qubits.
    pub fn barrier_all(&mut self) -> IrResult<&mut Self> {
        let qubits: Vec<_> = (0..self.num_qubits).map(QubitId).collect();
        self.push(Instruction::barrier(qubits))?;
        Ok(self)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits as usize
    }

    /// Get the number of classical bits.
    pub fn num_clbits(&self) -> usize {
        self.num_clbits as usize
    }

    /// Get the instructions in application order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Get the number of operations (barriers excluded).
    pub fn num_ops(&self) -> usize {
        self.instructions.iter().filter(|i| !i.is_barrier()).count()
    }

    /// Get the circuit depth.
    ///
    /// The length of the longest chain of operations over any wire.
    /// Barriers synchronize wires but contribute no depth of their own.
    pub fn depth(&self) -> usize {
        let mut qubit_depth = vec![0usize; self.num_qubits as usize];
        let mut clbit_depth = vec![0usize; self.num_clbits as usize];

        for inst in &self.instructions {
            let level = inst
                .qubits
                .iter()
                .map(|q| qubit_depth[q.0 as usize])
                .chain(inst.clbits.iter().map(|c| clbit_depth[c.0 as usize]))
                .max()
                .unwrap_or(0);
            let level = if inst.is_barrier() { level } else { level + 1 };
            for q in &inst.qubits {
                qubit_depth[q.0 as usize] = level;
            }
            for c in &inst.clbits {
                clbit_depth[c.0 as usize] = level;
            }
        }

        qubit_depth
            .into_iter()
            .chain(clbit_depth)
            .max()
            .unwrap_or(0)
    }

    // =========================================================================
    // Pre-built circuits
    // =========================================================================

    /// Create a Bell state circuit.
    pub fn bell() -> IrResult<Self> {
        let mut circuit = Self::with_size("bell", 2, 2);
        circuit
            .h(QubitId(0))?
            .cx(QubitId(0), QubitId(1))?
            .measure(QubitId(0), ClbitId(0))?
            .measure(QubitId(1), ClbitId(1))?;
        Ok(circuit)
    }

    /// Create a GHZ state circuit.
    pub fn ghz(n: u32) -> IrResult<Self> {
        if n == 0 {
            return Ok(Self::new("ghz_0"));
        }

        let mut circuit = Self::with_size("ghz", n, n);
        circuit.h(QubitId(0))?;
        for i in 0..n - 1 {
            circuit.cx(QubitId(i), QubitId(i + 1))?;
        }
        for i in 0..n {
            circuit.measure(QubitId(i), ClbitId(i))?;
        }
        Ok(circuit)
    }
}
