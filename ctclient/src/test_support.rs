//! Test support helpers intended for use by unit and integration tests.
//!
//! `StubService` is a small in-process reader manager: it answers RESET,
//! TRANSACT, LOCK and UNLOCK the way the real service does, keeps its own
//! lock table and counts every call it receives.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::constants::{COMMAND_BUFFER_SIZE, MAX_SLOTS};
use crate::error::ServiceError;
use crate::protocol::{FrameBuffer, TlvBuilder, TlvParser};
use crate::registry::StaticRegistry;
use crate::transport::{Connector, Transport};
use crate::types::{LockType, Opcode, ReaderInfo, Tag};
use crate::{Error, Result};

/// Mutable state behind a `StubService`.
#[derive(Debug, Default)]
pub struct StubState {
    /// Every request frame received, in order
    pub requests: Vec<Vec<u8>>,
    /// ATR returned by RESET, per slot; slots without one answer `NoCard`
    pub atr: HashMap<u8, Vec<u8>>,
    /// Fixed TRANSACT reply; when unset the stub answers `90 00`
    pub transact_reply: Option<Vec<u8>>,
    /// Granted locks: handle -> (slot, type)
    pub locks: HashMap<u32, (u8, LockType)>,
    /// Last handle handed out
    pub next_lock: u32,
    /// Addresses passed to `open`
    pub opened: Vec<String>,
    /// Number of transports closed
    pub closed: usize,
}

/// Shared-state stub service. Clones talk to the same state.
#[derive(Debug, Clone, Default)]
pub struct StubService {
    state: Rc<RefCell<StubState>>,
}

impl StubService {
    /// Stub with no cards inserted
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a card answering RESET with `atr`.
    pub fn with_atr(self, slot: u8, atr: &[u8]) -> Self {
        self.state.borrow_mut().atr.insert(slot, atr.to_vec());
        self
    }

    /// Fixed reply for every TRANSACT.
    pub fn with_transact_reply(self, reply: &[u8]) -> Self {
        self.state.borrow_mut().transact_reply = Some(reply.to_vec());
        self
    }

    /// Requests received so far
    pub fn calls(&self) -> usize {
        self.state.borrow().requests.len()
    }

    /// Copy of every request frame
    pub fn requests(&self) -> Vec<Vec<u8>> {
        self.state.borrow().requests.clone()
    }

    /// Locks currently held
    pub fn active_locks(&self) -> usize {
        self.state.borrow().locks.len()
    }

    /// Transports closed so far
    pub fn closed(&self) -> usize {
        self.state.borrow().closed
    }

    fn handle(&self, request: &[u8]) -> Result<Vec<u8>> {
        let mut st = self.state.borrow_mut();
        st.requests.push(request.to_vec());

        if request.len() < 2 {
            return Err(ServiceError::InvalidArg.into());
        }
        let opcode = Opcode::try_from(request[0]).map_err(|_| ServiceError::NotSupported)?;
        let slot = request[1];
        let body = &request[2..];

        let mut reply = FrameBuffer::with_capacity(COMMAND_BUFFER_SIZE);
        match opcode {
            Opcode::Reset => {
                let args = TlvParser::parse(body).map_err(|_| ServiceError::InvalidArg)?;
                if args.contains(Tag::Timeout) {
                    args.get_int(Tag::Timeout)
                        .map_err(|_| ServiceError::InvalidArg)?;
                }
                let atr = st.atr.get(&slot).ok_or(ServiceError::NoCard)?;
                TlvBuilder::new(&mut reply).put_bytes(Tag::Atr, atr)?;
            }
            Opcode::Transact => {
                let out = st
                    .transact_reply
                    .clone()
                    .unwrap_or_else(|| vec![0x90, 0x00]);
                return Ok(out);
            }
            Opcode::Lock => {
                let args = TlvParser::parse(body).map_err(|_| ServiceError::InvalidArg)?;
                let lock_type = match args.get_int(Tag::LockType) {
                    Ok(0) => LockType::Shared,
                    Ok(1) => LockType::Exclusive,
                    _ => return Err(ServiceError::InvalidArg.into()),
                };
                let conflict = st.locks.values().any(|&(s, t)| {
                    s == slot && (t == LockType::Exclusive || lock_type == LockType::Exclusive)
                });
                if conflict {
                    return Err(ServiceError::AlreadyLocked.into());
                }
                st.next_lock += 1;
                let handle = st.next_lock;
                st.locks.insert(handle, (slot, lock_type));
                TlvBuilder::new(&mut reply).put_int(Tag::Lock, handle)?;
            }
            Opcode::Unlock => {
                let args = TlvParser::parse(body).map_err(|_| ServiceError::InvalidArg)?;
                let handle = args.get_int(Tag::Lock).map_err(|_| ServiceError::InvalidArg)?;
                let owner = st.locks.get(&handle).map(|&(s, _)| s);
                if owner != Some(slot) {
                    return Err(ServiceError::NotLocked.into());
                }
                st.locks.remove(&handle);
            }
        }
        Ok(reply.into_vec())
    }

    /// Registry with one reader per entry of `slots`, all slots empty.
    /// Slot counts are clamped to `MAX_SLOTS`.
    pub fn registry(slots: &[usize]) -> StaticRegistry {
        StaticRegistry::new(
            slots
                .iter()
                .enumerate()
                .flat_map(|(i, &n)| {
                    ReaderInfo::new(format!("stub{}", i), vec![0; n.min(MAX_SLOTS)])
                })
                .collect(),
        )
    }
}

/// Transport handed out by `StubService::open`.
#[derive(Debug)]
pub struct StubTransport {
    service: StubService,
    open: bool,
}

impl Transport for StubTransport {
    fn call(&mut self, request: &[u8], capacity: usize) -> Result<Vec<u8>> {
        if !self.open {
            return Err(std::io::Error::new(std::io::ErrorKind::NotConnected, "stub closed").into());
        }
        let reply = self.service.handle(request)?;
        if reply.len() > capacity {
            return Err(Error::BufferOverflow {
                capacity,
                required: reply.len(),
            });
        }
        Ok(reply)
    }

    fn close(&mut self) -> Result<()> {
        if self.open {
            self.open = false;
            self.service.state.borrow_mut().closed += 1;
        }
        Ok(())
    }
}

impl Connector for StubService {
    fn open(&self, address: &str) -> Result<Box<dyn Transport>> {
        self.state.borrow_mut().opened.push(address.to_string());
        Ok(Box::new(StubTransport {
            service: self.clone(),
            open: true,
        }))
    }
}
