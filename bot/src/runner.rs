//! The scheduled polling loop.
//!
//! Each iteration runs `Poller::tick` on a blocking worker, then waits out
//! the retry period. Shutdown is only observed between iterations: an
//! in-flight request runs to completion or to its own timeout.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use homework_core::{
    ChatTransport, HomeworkClient, HomeworkSource, Notifier, PollState, Poller, TelegramApi,
};
use tokio::signal;
use tracing::{debug, error, info};

use crate::config::Config;
use crate::source::{PracticumSource, TelegramTransport};
use crate::transport;

/// Wire the live transports from `config` and poll until Ctrl-C.
pub async fn run(config: Config) -> Result<()> {
    let agent = transport::agent(config.request_timeout);
    let source = PracticumSource::new(
        HomeworkClient::new(&config.endpoint, &config.practicum_token),
        agent.clone(),
    );
    let chat = TelegramTransport::new(
        TelegramApi::new(&config.telegram_api_url, &config.telegram_token),
        agent,
    );
    let poller = Arc::new(Poller::new(
        source,
        Notifier::new(chat, &config.telegram_chat_id),
    ));

    info!(
        "polling {} every {:?}",
        config.endpoint, config.retry_period
    );
    poll_until(
        poller,
        PollState::starting_at(unix_now()),
        config.retry_period,
        interrupted(),
    )
    .await?;
    info!("stopped by operator");
    Ok(())
}

/// Run iterations back to back, `period` apart, until `shutdown` completes.
///
/// `shutdown` is checked after every iteration, so a future that is already
/// complete still lets exactly one iteration run. Returns the final state.
pub async fn poll_until<S, T>(
    poller: Arc<Poller<S, T>>,
    mut state: PollState,
    period: Duration,
    shutdown: impl Future<Output = ()>,
) -> Result<PollState>
where
    S: HomeworkSource + Send + Sync + 'static,
    T: ChatTransport + Send + Sync + 'static,
{
    tokio::pin!(shutdown);
    loop {
        let worker = Arc::clone(&poller);
        state = tokio::task::spawn_blocking(move || {
            let outcome = worker.tick(&mut state);
            debug!(?outcome, cursor = state.timestamp, "iteration finished");
            state
        })
        .await?;

        tokio::select! {
            biased;
            () = &mut shutdown => return Ok(state),
            () = tokio::time::sleep(period) => {}
        }
    }
}

/// Completes on Ctrl-C. If the handler cannot be installed the loop runs
/// until the process is killed.
async fn interrupted() {
    if let Err(e) = signal::ctrl_c().await {
        error!("cannot listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs() as i64)
}
