//! Poll handler that reads and prints the table.

use std::io::Write;
use std::sync::Arc;

use async_trait::async_trait;
use pokernow_protocols::{DomAccessor, DomError};
use pokernow_runloop::{PollError, PollHandler};
use pokernow_table::TableStateBuilder;
use tracing::{debug, info};

use crate::display;

fn poll_error(context: &str, e: DomError) -> PollError {
    if e.is_fatal() {
        PollError::Fatal(format!("{}: {}", context, e))
    } else {
        PollError::Poll(format!("{}: {}", context, e))
    }
}

/// Builds a snapshot every cycle and writes its rendering to `out`.
///
/// Each cycle stands alone; nothing is carried over from the previous poll.
pub(crate) struct TableWatcher<W> {
    dom: Arc<dyn DomAccessor>,
    builder: TableStateBuilder,
    out: W,
}

impl<W: Write + Send> TableWatcher<W> {
    pub(crate) fn new(dom: Arc<dyn DomAccessor>, out: W) -> Self {
        Self {
            dom,
            builder: TableStateBuilder::new(),
            out,
        }
    }
}

#[async_trait]
impl<W: Write + Send> PollHandler for TableWatcher<W> {
    async fn on_poll(&mut self, cycle: u64) -> Result<(), PollError> {
        let built = self.builder.build(self.dom.as_ref()).await;
        self.dom
            .release()
            .await
            .map_err(|e| poll_error("Releasing element handles", e))?;
        let snapshot = built.map_err(|e| poll_error("Reading table state", e))?;

        match snapshot.current_player() {
            Some(current) => {
                info!("Cycle {}: {} to act ({})", cycle, current.name, current.position_name)
            }
            None => debug!("Cycle {}: nobody to act", cycle),
        }

        self.out
            .write_all(display::render(&snapshot).as_bytes())
            .and_then(|_| self.out.flush())
            .map_err(|e| PollError::Poll(format!("Writing table state: {}", e)))?;

        Ok(())
    }
}
