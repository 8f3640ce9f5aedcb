//! Headless booking run: the same triggers the widget sends, with each
//! forward transition committed after its tokio sleep.

use anyhow::{Context, Result, bail};
use clap::Args;
use concierge_engine::{BookingFlow, Catalog, Dispatch};
use concierge_types::{BookingState, FlowSettings, Trigger};
use tracing::{debug, info};

#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Service id (see `concierge catalog`)
    #[arg(long)]
    pub service: String,

    /// Time slot label, e.g. "2:30 PM"
    #[arg(long)]
    pub time: String,

    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,
}

impl SimulateArgs {
    fn triggers(self) -> [Trigger; 3] {
        [
            Trigger::PickService {
                service_id: self.service,
            },
            Trigger::PickTime { slot: self.time },
            Trigger::SubmitDetails {
                name: self.name,
                email: self.email,
            },
        ]
    }
}

pub async fn run(args: SimulateArgs, settings: FlowSettings) -> Result<BookingState> {
    let mut flow = BookingFlow::new(Catalog::default(), settings);
    for trigger in args.triggers() {
        drive(&mut flow, trigger).await?;
    }
    info!(step = ?flow.state().step, "simulation finished");
    Ok(flow.state().clone())
}

async fn drive(flow: &mut BookingFlow, trigger: Trigger) -> Result<()> {
    let label = trigger.label();
    let dispatch = flow.dispatch(trigger).with_context(|| format!("{label} rejected"))?;
    match dispatch {
        Dispatch::Applied { from, to, .. } => debug!(?from, ?to, "applied {label}"),
        Dispatch::Scheduled { scheduled, .. } => {
            debug!(
                ticket = %scheduled.ticket,
                delay_ms = scheduled.delay.as_millis() as u64,
                target = ?scheduled.target,
                "waiting for transition"
            );
            tokio::time::sleep(scheduled.delay).await;
            if !flow.complete(scheduled.ticket) {
                bail!("transition {} for {label} was superseded", scheduled.ticket);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use concierge_types::{Step, TransitionDelays};

    use super::*;

    fn args(service: &str, name: &str) -> SimulateArgs {
        SimulateArgs {
            service: service.into(),
            time: "2:30 PM".into(),
            name: name.into(),
            email: "ada@example.com".into(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn full_run_ends_on_success() {
        let started = tokio::time::Instant::now();
        let state = run(args("specialist", "Ada Lovelace"), FlowSettings::default()).await.unwrap();
        assert_eq!(state.step, Step::Success);
        assert_eq!(state.selection.time.as_deref(), Some("2:30 PM"));
        assert_eq!(state.selection.name, "Ada Lovelace");
        // 600 + 500 + 1500 ms of simulated loading.
        assert!(started.elapsed() >= std::time::Duration::from_millis(2600));
    }

    #[tokio::test]
    async fn instant_delays_still_complete() {
        let settings = FlowSettings {
            delays: TransitionDelays::instant(),
            ..FlowSettings::default()
        };
        let state = run(args("primary", "Ada"), settings).await.unwrap();
        assert_eq!(state.step, Step::Success);
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_service_is_an_error() {
        let error = run(args("acupuncture", "Ada"), FlowSettings::default()).await.unwrap_err();
        assert!(error.to_string().contains("pick_service rejected"));
    }

    #[tokio::test(start_paused = true)]
    async fn blank_name_is_rejected() {
        let error = run(args("primary", "   "), FlowSettings::default()).await.unwrap_err();
        assert!(error.to_string().contains("submit_details rejected"));
    }
}
