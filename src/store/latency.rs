use std::time::Duration;

use tracing::trace;

/// Calls exposed by the mock data service, used to pick a simulated delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Login,
    Signup,
    UpdateProfile,
    GetUser,
    UserShipments,
    GetShipment,
    BookShipment,
    AllUsers,
    AllShipments,
    UpdateStatus,
}

impl Operation {
    pub const fn simulated_delay(self) -> Duration {
        match self {
            Operation::Login | Operation::Signup | Operation::UpdateProfile => {
                Duration::from_millis(1000)
            }
            Operation::BookShipment => Duration::from_millis(1500),
            Operation::UpdateStatus => Duration::from_millis(700),
            Operation::GetUser
            | Operation::UserShipments
            | Operation::GetShipment
            | Operation::AllUsers
            | Operation::AllShipments => Duration::from_millis(500),
        }
    }
}

/// Artificial network latency applied before every store call resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    enabled: bool,
}

impl Latency {
    pub const fn simulated() -> Self {
        Self { enabled: true }
    }

    pub const fn none() -> Self {
        Self { enabled: false }
    }

    pub fn delay_for(&self, op: Operation) -> Duration {
        if self.enabled {
            op.simulated_delay()
        } else {
            Duration::ZERO
        }
    }

    pub async fn wait(&self, op: Operation) {
        let delay = self.delay_for(op);
        if delay.is_zero() {
            return;
        }
        trace!(?op, delay_ms = delay.as_millis() as u64, "simulating latency");
        tokio::time::sleep(delay).await;
    }
}

impl Default for Latency {
    fn default() -> Self {
        Self::simulated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_latency_is_zero_for_every_operation() {
        let latency = Latency::none();
        assert_eq!(latency.delay_for(Operation::BookShipment), Duration::ZERO);
        assert_eq!(latency.delay_for(Operation::Login), Duration::ZERO);
    }

    #[test]
    fn booking_is_the_slowest_call() {
        let latency = Latency::simulated();
        assert_eq!(latency.delay_for(Operation::BookShipment), Duration::from_millis(1500));
        assert_eq!(latency.delay_for(Operation::UpdateStatus), Duration::from_millis(700));
        assert_eq!(latency.delay_for(Operation::AllUsers), Duration::from_millis(500));
    }

    #[tokio::test(start_paused = true)]
    async fn wait_sleeps_for_the_operation_delay() {
        let start = tokio::time::Instant::now();
        Latency::simulated().wait(Operation::Signup).await;
        assert!(start.elapsed() >= Duration::from_millis(1000));
    }
}
