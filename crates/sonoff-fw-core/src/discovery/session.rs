//! MQTT discovery session.
//!
//! One pass: connect, subscribe to `stat/#`, broadcast `Status 2`, collect
//! replies until the window closes, then unsubscribe and disconnect.

use std::time::Duration;

use rumqttc::{AsyncClient, ConnectionError, Event, EventLoop, Outgoing, Packet, Publish, QoS};
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinHandle};
use tokio::time::{sleep_until, timeout, timeout_at, Instant};
use tracing::{debug, error, info, trace, warn};

use super::devices::DiscoveredDevices;
use crate::config::SessionConfig;
use crate::error::{ConnectRefusal, SessionError};
use crate::protocol::{STATUS_COMMAND_TOPIC, STATUS_QUERY_PAYLOAD, STATUS_SUBSCRIPTION};

/// Capacity of the client request queue
const REQUESTS_CAP: usize = 10;

/// How long the event loop gets to flush UNSUBSCRIBE/DISCONNECT
const SHUTDOWN_GRACE: Duration = Duration::from_secs(1);

/// A broker connection that has been accepted (CONNACK success).
pub struct DiscoverySession {
    client: AsyncClient,
    event_loop: EventLoop,
    broker: String,
}

impl DiscoverySession {
    /// Connect to the broker and wait for its CONNACK.
    ///
    /// Nothing is subscribed or published until the broker accepts us, so a
    /// refused connection never sends the status query.
    pub async fn connect(config: &SessionConfig) -> Result<Self, SessionError> {
        let broker = config.broker();
        let (client, mut event_loop) = AsyncClient::new(config.mqtt_options(), REQUESTS_CAP);

        debug!("Connecting to {} as {}", broker, config.client_id());

        loop {
            match event_loop.poll().await {
                Ok(Event::Incoming(Packet::ConnAck(ack))) => {
                    if let Some(refusal) = ConnectRefusal::from_return_code(ack.code) {
                        return Err(refused(refusal));
                    }
                    info!("Connected to {}", broker);
                    break;
                }
                Ok(event) => trace!("Event before CONNACK: {:?}", event),
                Err(ConnectionError::ConnectionRefused(code)) => {
                    return Err(match ConnectRefusal::from_return_code(code) {
                        Some(refusal) => refused(refusal),
                        None => transport(&broker, ConnectionError::ConnectionRefused(code)),
                    });
                }
                Err(e) => return Err(transport(&broker, e)),
            }
        }

        Ok(Self {
            client,
            event_loop,
            broker,
        })
    }

    /// Run one discovery pass and return every device that answered within `wait`.
    pub async fn run_discovery(self, wait: Duration) -> Result<DiscoveredDevices, SessionError> {
        let Self {
            client,
            event_loop,
            broker,
        } = self;

        let (tx, mut rx) = mpsc::unbounded_channel();
        let pump = tokio::spawn(pump_events(event_loop, tx));

        client
            .subscribe(STATUS_SUBSCRIPTION, QoS::AtMostOnce)
            .await?;
        debug!("Publishing {} to {}", STATUS_QUERY_PAYLOAD, STATUS_COMMAND_TOPIC);
        client
            .publish(STATUS_COMMAND_TOPIC, QoS::AtMostOnce, false, STATUS_QUERY_PAYLOAD)
            .await?;

        let mut devices = DiscoveredDevices::new();
        let deadline = Instant::now() + wait;

        loop {
            match timeout_at(deadline, rx.recv()).await {
                Ok(Some(publish)) => apply_publish(&mut devices, &publish),
                Ok(None) => {
                    // Event loop ended early; nothing more can arrive.
                    sleep_until(deadline).await;
                    break;
                }
                Err(_) => break,
            }
        }
        drop(rx);

        shutdown(&client, pump, &broker).await;

        Ok(devices)
    }
}

/// Connect, run one discovery pass with the configured window, and return the result.
pub async fn discover(config: &SessionConfig) -> Result<DiscoveredDevices, SessionError> {
    let session = DiscoverySession::connect(config).await?;
    session.run_discovery(config.discovery_wait()).await
}

fn refused(refusal: ConnectRefusal) -> SessionError {
    let err = SessionError::Refused(refusal);
    error!("{}", err);
    err
}

fn transport(broker: &str, source: ConnectionError) -> SessionError {
    let err = SessionError::Transport {
        broker: broker.to_string(),
        source,
    };
    error!("{}", err);
    err
}

fn apply_publish(devices: &mut DiscoveredDevices, publish: &Publish) {
    debug!(
        "{} {}",
        publish.topic,
        String::from_utf8_lossy(&publish.payload)
    );

    match devices.handle_status_message(&publish.topic, &publish.payload) {
        Ok(Some(device)) => debug!("{} reports firmware {}", device.id, device.version()),
        Ok(None) => {}
        Err(e) => warn!("{}", e),
    }
}

/// Drive the event loop, forwarding inbound publishes until our DISCONNECT goes out.
async fn pump_events(
    mut event_loop: EventLoop,
    tx: mpsc::UnboundedSender<Publish>,
) -> Result<(), ConnectionError> {
    loop {
        match event_loop.poll().await? {
            Event::Incoming(Packet::Publish(publish)) => {
                // Receiver is gone once the window has closed.
                let _ = tx.send(publish);
            }
            Event::Outgoing(Outgoing::Disconnect) => return Ok(()),
            event => trace!("MQTT event: {:?}", event),
        }
    }
}

async fn shutdown(
    client: &AsyncClient,
    pump: JoinHandle<Result<(), ConnectionError>>,
    broker: &str,
) {
    if let Err(e) = client.unsubscribe(STATUS_SUBSCRIPTION).await {
        debug!("Unsubscribe skipped: {}", e);
    }
    if let Err(e) = client.disconnect().await {
        debug!("Disconnect skipped: {}", e);
    }

    match join_or_abort(pump, SHUTDOWN_GRACE).await {
        Some(Ok(Ok(()))) => debug!("Disconnected from {}", broker),
        Some(Ok(Err(e))) => warn!("Connection to {} ended: {}", broker, e),
        Some(Err(e)) => warn!("Event loop task failed: {}", e),
        None => warn!("Timed out disconnecting from {}", broker),
    }
}

/// Wait up to `grace` for `task`; abort it and return `None` if it is still running.
async fn join_or_abort<T>(task: JoinHandle<T>, grace: Duration) -> Option<Result<T, JoinError>> {
    let abort = task.abort_handle();
    match timeout(grace, task).await {
        Ok(joined) => Some(joined),
        Err(_) => {
            abort.abort();
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refused_builds_session_error() {
        let err = refused(ConnectRefusal::BadCredentials);
        assert_eq!(err.to_string(), "Connection refused: Unauthenticated");
    }

    #[test]
    fn test_apply_publish_ignores_foreign_topic() {
        let mut devices = DiscoveredDevices::new();
        let publish = Publish::new("tele/plugA/LWT", QoS::AtMostOnce, "Online");
        apply_publish(&mut devices, &publish);
        assert!(devices.is_empty());
    }

    #[test]
    fn test_apply_publish_records_status() {
        let mut devices = DiscoveredDevices::new();
        let publish = Publish::new(
            "stat/plugA/STATUS2",
            QoS::AtMostOnce,
            r#"{"StatusFWR":{"Version":"9.5.0"}}"#,
        );
        apply_publish(&mut devices, &publish);
        assert_eq!(devices.get("plugA").unwrap().version(), "9.5.0");
    }

    #[tokio::test]
    async fn test_stuck_task_is_aborted_after_grace() {
        let (alive_tx, alive_rx) = tokio::sync::oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            let _alive = alive_tx;
            std::future::pending::<()>().await
        });

        assert!(join_or_abort(task, Duration::from_millis(20)).await.is_none());
        // Sender is dropped only once the aborted task is torn down.
        assert!(timeout(Duration::from_secs(5), alive_rx).await.unwrap().is_err());
    }

    #[tokio::test]
    async fn test_finished_task_is_joined() {
        let task = tokio::spawn(async { 7 });
        assert_eq!(
            join_or_abort(task, Duration::from_secs(5)).await.unwrap().unwrap(),
            7
        );
    }

    #[test]
    fn test_apply_publish_survives_bad_payload() {
        let mut devices = DiscoveredDevices::new();
        let publish = Publish::new("stat/plugA/STATUS2", QoS::AtMostOnce, "garbage");
        apply_publish(&mut devices, &publish);
        assert!(devices.is_empty());
    }
}
