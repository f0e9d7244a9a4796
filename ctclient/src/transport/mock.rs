// ctclient-rs/ctclient/src/transport/mock.rs

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::rc::Rc;

use crate::transport::traits::{Connector, Transport};
use crate::{Error, Result};

/// Mock transport for unit tests. It records sent requests and returns
/// queued replies (or queued errors) in order.
#[derive(Debug, Default)]
pub struct MockTransport {
    /// Every request, in order
    pub sent: Vec<Vec<u8>>,
    /// Queued replies, consumed front first
    pub responses: VecDeque<Result<Vec<u8>>>,
    /// Set by `close`
    pub closed: bool,
    /// Testing hook: make `close` fail once
    pub fail_close: bool,
}

impl MockTransport {
    /// Open mock with nothing queued
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply.
    pub fn push_response(&mut self, resp: Vec<u8>) {
        self.responses.push_back(Ok(resp));
    }

    /// Queue a failure.
    pub fn push_error(&mut self, err: Error) {
        self.responses.push_back(Err(err));
    }

    /// Requests received so far
    pub fn calls(&self) -> usize {
        self.sent.len()
    }

    /// Most recent request
    pub fn last_sent(&self) -> Option<&[u8]> {
        self.sent.last().map(Vec::as_slice)
    }
}

impl Transport for MockTransport {
    fn call(&mut self, request: &[u8], capacity: usize) -> Result<Vec<u8>> {
        if self.closed {
            return Err(io::Error::new(io::ErrorKind::NotConnected, "mock transport closed").into());
        }
        self.sent.push(request.to_vec());

        let resp = self.responses.pop_front().unwrap_or_else(|| {
            Err(io::Error::new(io::ErrorKind::UnexpectedEof, "no queued response").into())
        })?;
        if resp.len() > capacity {
            return Err(Error::BufferOverflow {
                capacity,
                required: resp.len(),
            });
        }
        Ok(resp)
    }

    fn close(&mut self) -> Result<()> {
        if self.fail_close {
            self.fail_close = false;
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "mock close failure").into());
        }
        self.closed = true;
        Ok(())
    }
}

/// Transport that answers every request with the request bytes themselves.
#[derive(Debug, Default)]
pub struct LoopbackTransport {
    /// Requests echoed so far
    pub calls: usize,
}

impl LoopbackTransport {
    /// Fresh loopback
    pub fn new() -> Self {
        Self::default()
    }
}

impl Transport for LoopbackTransport {
    fn call(&mut self, request: &[u8], capacity: usize) -> Result<Vec<u8>> {
        self.calls += 1;
        if request.len() > capacity {
            return Err(Error::BufferOverflow {
                capacity,
                required: request.len(),
            });
        }
        Ok(request.to_vec())
    }
}

/// Transport handed out by `MockConnector`; delegates to the shared mock so
/// tests can inspect it after the handle has taken ownership.
#[derive(Debug)]
pub struct SharedTransport {
    inner: Rc<RefCell<MockTransport>>,
}

impl Transport for SharedTransport {
    fn call(&mut self, request: &[u8], capacity: usize) -> Result<Vec<u8>> {
        self.inner.borrow_mut().call(request, capacity)
    }

    fn close(&mut self) -> Result<()> {
        self.inner.borrow_mut().close()
    }
}

/// Connector that always opens the same shared `MockTransport` and records
/// the addresses it was asked for.
#[derive(Debug, Clone, Default)]
pub struct MockConnector {
    transport: Rc<RefCell<MockTransport>>,
    opened: Rc<RefCell<Vec<String>>>,
    refuse: bool,
}

impl MockConnector {
    /// Connector handing out one shared `MockTransport`
    pub fn new() -> Self {
        Self::default()
    }

    /// A connector whose `open` always fails with `ConnectionRefused`
    pub fn refusing() -> Self {
        Self {
            refuse: true,
            ..Self::default()
        }
    }

    /// The transport every `open` returns
    pub fn transport(&self) -> Rc<RefCell<MockTransport>> {
        Rc::clone(&self.transport)
    }

    /// Addresses requested so far
    pub fn opened(&self) -> Vec<String> {
        self.opened.borrow().clone()
    }
}

impl Connector for MockConnector {
    fn open(&self, address: &str) -> Result<Box<dyn Transport>> {
        self.opened.borrow_mut().push(address.to_string());
        if self.refuse {
            return Err(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                format!("no reader manager at {}", address),
            )
            .into());
        }
        Ok(Box::new(SharedTransport {
            inner: Rc::clone(&self.transport),
        }))
    }
}
