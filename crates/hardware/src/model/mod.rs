//! Model port contract and binding.
//!
//! This module defines the boundary between the harness and a hardware model. It
//! provides:
//! 1. **Port Descriptors:** Name, direction, and width for every port a model
//!    exposes.
//! 2. **Binding:** `PortBinder` attaches one signal to each port and rejects
//!    unknown ports, double bindings, and width mismatches; `finalize` refuses
//!    to produce a `PortMap` while any port is unbound.
//! 3. **Model Trait:** The `eval` entry point the run loop calls on every clock
//!    edge, plus wiring helpers.
//!
//! Models never see the harness directly; they declare ports, accept a
//! finalized map, and read/write signals through the handles it resolves.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

use crate::bridge::Bridge;
use crate::harness::clock::EdgeKind;
use crate::harness::signal::{BitId, SignalDb, WordId};

/// Direction of a model port as seen from the model.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PortDir {
    /// Driven by the harness, sampled by the model.
    Input,
    /// Driven by the model, sampled by the harness.
    Output,
}

/// Width class of a model port.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PortWidth {
    /// A single-bit port carried on a `bool` signal.
    Bit,
    /// A 32-bit port carried on a `u32` signal.
    Word,
}

impl fmt::Display for PortWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bit => write!(f, "1-bit"),
            Self::Word => write!(f, "32-bit"),
        }
    }
}

/// Descriptor for one port of a model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PortSpec {
    /// Port name, unique within the model.
    pub name: String,
    /// Direction as seen from the model.
    pub dir: PortDir,
    /// Width class of the port.
    pub width: PortWidth,
}

impl PortSpec {
    /// Declares a 1-bit input port.
    pub fn input_bit(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dir: PortDir::Input,
            width: PortWidth::Bit,
        }
    }

    /// Declares a 32-bit input port.
    pub fn input_word(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dir: PortDir::Input,
            width: PortWidth::Word,
        }
    }

    /// Declares a 1-bit output port.
    pub fn output_bit(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dir: PortDir::Output,
            width: PortWidth::Bit,
        }
    }

    /// Declares a 32-bit output port.
    pub fn output_word(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dir: PortDir::Output,
            width: PortWidth::Word,
        }
    }
}

/// Violation of the port binding rules.
///
/// Every port must be bound to exactly one signal of matching width before the
/// simulation starts; these are the ways a wiring attempt can break that rule.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BindError {
    /// The model declares no port with this name.
    #[error("model has no port named '{0}'")]
    UnknownPort(String),

    /// The port already has a signal attached.
    #[error("port '{0}' is already bound")]
    AlreadyBound(String),

    /// The signal width does not match the port width.
    #[error("width mismatch on port '{name}': expected {expected}, got {got}")]
    WidthMismatch {
        /// Name of the port being bound.
        name: String,
        /// Width the port declares.
        expected: PortWidth,
        /// Width of the signal offered.
        got: PortWidth,
    },

    /// `finalize` found a port with no signal attached.
    #[error("port '{0}' was never bound")]
    Unbound(String),
}

/// Signal attachment for one bound port.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PortSignal {
    Bit(BitId),
    Word(WordId),
}

/// Accumulates port-to-signal attachments for one model.
///
/// Built from the model's declared port list; `bind_bit`/`bind_word` validate
/// each attachment and `finalize` checks completeness before producing the
/// immutable [`PortMap`] handed to the model.
#[derive(Debug)]
pub struct PortBinder {
    specs: Vec<PortSpec>,
    bound: HashMap<String, PortSignal>,
}

impl PortBinder {
    /// Creates a binder for the given declared port list.
    pub fn new(specs: Vec<PortSpec>) -> Self {
        Self {
            specs,
            bound: HashMap::new(),
        }
    }

    /// Attaches a 1-bit signal to the named port.
    ///
    /// # Errors
    ///
    /// Returns a [`BindError`] if the port is unknown, already bound, or not
    /// 1-bit wide.
    pub fn bind_bit(&mut self, name: &str, id: BitId) -> Result<(), BindError> {
        self.bind(name, PortSignal::Bit(id), PortWidth::Bit)
    }

    /// Attaches a 32-bit signal to the named port.
    ///
    /// # Errors
    ///
    /// Returns a [`BindError`] if the port is unknown, already bound, or not
    /// 32-bit wide.
    pub fn bind_word(&mut self, name: &str, id: WordId) -> Result<(), BindError> {
        self.bind(name, PortSignal::Word(id), PortWidth::Word)
    }

    fn bind(&mut self, name: &str, signal: PortSignal, width: PortWidth) -> Result<(), BindError> {
        let spec = self
            .specs
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| BindError::UnknownPort(name.to_string()))?;
        if spec.width != width {
            return Err(BindError::WidthMismatch {
                name: name.to_string(),
                expected: spec.width,
                got: width,
            });
        }
        if self.bound.contains_key(name) {
            return Err(BindError::AlreadyBound(name.to_string()));
        }
        let _ = self.bound.insert(name.to_string(), signal);
        Ok(())
    }

    /// Verifies every declared port is bound and freezes the map.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::Unbound`] naming the first port with no signal.
    pub fn finalize(self) -> Result<PortMap, BindError> {
        if let Some(spec) = self.specs.iter().find(|s| !self.bound.contains_key(&s.name)) {
            return Err(BindError::Unbound(spec.name.clone()));
        }
        Ok(PortMap { bound: self.bound })
    }
}

/// Immutable, complete port-to-signal map for one model.
///
/// Produced only by [`PortBinder::finalize`], so every declared port is present
/// at its declared width.
#[derive(Clone, Debug)]
pub struct PortMap {
    bound: HashMap<String, PortSignal>,
}

impl PortMap {
    /// Resolves the 1-bit signal bound to the named port.
    ///
    /// # Errors
    ///
    /// Returns a [`BindError`] if the name is absent from the map or the port
    /// is 32-bit wide.
    pub fn bit(&self, name: &str) -> Result<BitId, BindError> {
        match self.bound.get(name) {
            Some(PortSignal::Bit(id)) => Ok(*id),
            Some(PortSignal::Word(_)) => Err(BindError::WidthMismatch {
                name: name.to_string(),
                expected: PortWidth::Word,
                got: PortWidth::Bit,
            }),
            None => Err(BindError::UnknownPort(name.to_string())),
        }
    }

    /// Resolves the 32-bit signal bound to the named port.
    ///
    /// # Errors
    ///
    /// Returns a [`BindError`] if the name is absent from the map or the port
    /// is 1-bit wide.
    pub fn word(&self, name: &str) -> Result<WordId, BindError> {
        match self.bound.get(name) {
            Some(PortSignal::Word(id)) => Ok(*id),
            Some(PortSignal::Bit(_)) => Err(BindError::WidthMismatch {
                name: name.to_string(),
                expected: PortWidth::Bit,
                got: PortWidth::Word,
            }),
            None => Err(BindError::UnknownPort(name.to_string())),
        }
    }

    /// Returns the number of bound ports.
    pub fn len(&self) -> usize {
        self.bound.len()
    }

    /// Returns `true` if the map holds no ports.
    pub fn is_empty(&self) -> bool {
        self.bound.is_empty()
    }
}

/// Trait for hardware models evaluated by the run loop.
///
/// A model declares its ports, accepts a finalized port map, and is evaluated
/// once per clock edge. Optional downcasts expose concrete model types for
/// statistics collection.
pub trait Model: Send {
    /// Returns a short name for this model (e.g., `"bridge"`).
    fn name(&self) -> &str;

    /// Returns the full declared port list.
    fn ports(&self) -> Vec<PortSpec>;

    /// Accepts the finalized port map and resolves the handles the model keeps.
    ///
    /// # Errors
    ///
    /// Returns a [`BindError`] if a port the model requires is missing from the
    /// map or has the wrong width.
    fn bind(&mut self, map: &PortMap) -> Result<(), BindError>;

    /// Evaluates the model for one clock edge.
    ///
    /// Inputs are sampled and outputs driven through `signals`; the model sees
    /// the input values as they stood when the edge occurred.
    fn eval(&mut self, edge: EdgeKind, signals: &mut SignalDb);

    /// Returns a reference as [`Bridge`] if this model is the bridge; otherwise `None`.
    fn as_bridge(&self) -> Option<&Bridge> {
        None
    }
}

/// Constructs one harness signal per declared port and binds the model to them.
///
/// Each port gets a fresh signal carrying the port's name, so the invariant
/// that every port is bound to exactly one signal of matching width holds by
/// construction; the model then resolves its handles via `bind`.
///
/// # Arguments
///
/// * `model` - The model to wire.
/// * `signals` - The harness signal table to populate.
///
/// # Errors
///
/// Returns a [`BindError`] if the declared port list itself violates the
/// binding rules (e.g., a duplicated port name) or the model rejects the map.
pub fn wire(model: &mut dyn Model, signals: &mut SignalDb) -> Result<(), BindError> {
    let specs = model.ports();
    let mut binder = PortBinder::new(specs.clone());
    for spec in &specs {
        match spec.width {
            PortWidth::Bit => {
                let id = signals.add_bit(&spec.name);
                binder.bind_bit(&spec.name, id)?;
            }
            PortWidth::Word => {
                let id = signals.add_word(&spec.name);
                binder.bind_word(&spec.name, id)?;
            }
        }
    }
    let map = binder.finalize()?;
    model.bind(&map)
}
