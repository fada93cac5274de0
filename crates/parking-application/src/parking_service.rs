//! Allocation service.
//!
//! `ParkingService` owns the working copy of the registry and history, keeps
//! the occupancy grid projected from the registry, and writes a snapshot
//! after every successful mutation.

use chrono::NaiveDateTime;
use parking_core::grid::free_counts;
use parking_core::registry::check_vehicle_id;
use parking_core::slot::check_floor;
use parking_core::{
    Clock, Fee, FeePolicy, HistoryLog, OccupancyGrid, ParkingError, Receipt, Result, Session,
    SessionRecord, SlotAddress, Snapshot, SnapshotRepository, SubscriptionPlan, SystemClock,
    VehicleRegistry,
};

/// Entry, exit and subscription use cases over a snapshot-backed state.
///
/// Every mutation is staged on copies of the registry and history, the grid
/// is re-projected from the staged registry, the snapshot is saved, and only
/// then is the staged state swapped in. A failed save therefore leaves the
/// in-memory state untouched.
pub struct ParkingService<R, C = SystemClock> {
    repository: R,
    clock: C,
    policy: FeePolicy,
    registry: VehicleRegistry,
    history: HistoryLog,
    grid: OccupancyGrid,
}

impl<R: SnapshotRepository> ParkingService<R, SystemClock> {
    /// Opens the service on the wall clock.
    pub fn open(repository: R) -> Result<Self> {
        Self::with_clock(repository, SystemClock)
    }
}

impl<R: SnapshotRepository, C: Clock> ParkingService<R, C> {
    /// Loads the snapshot and projects the grid from it.
    ///
    /// A corrupt snapshot is returned as an error rather than replaced with
    /// empty state, so existing data is never overwritten by the next save.
    pub fn with_clock(repository: R, clock: C) -> Result<Self> {
        let mut service = Self {
            repository,
            clock,
            policy: FeePolicy::default(),
            registry: VehicleRegistry::new(),
            history: HistoryLog::new(),
            grid: OccupancyGrid::new(),
        };
        service.load()?;
        Ok(service)
    }

    /// Replaces the fee policy used by `leave` and `quote`.
    pub fn with_policy(mut self, policy: FeePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> &FeePolicy {
        &self.policy
    }

    // ============================================================================
    // Persistence
    // ============================================================================

    /// Re-reads the snapshot, replacing the in-memory state.
    pub fn load(&mut self) -> Result<()> {
        let snapshot = self.repository.load()?;
        let grid = OccupancyGrid::project(&snapshot.registry)?;

        tracing::debug!(
            "[Allocation] Loaded snapshot: {} active, {} occupied",
            snapshot.registry.len(),
            grid.count_occupied()
        );

        self.registry = snapshot.registry;
        self.history = snapshot.history;
        self.grid = grid;
        Ok(())
    }

    /// Writes the current state.
    pub fn save(&self) -> Result<()> {
        self.repository
            .save(&Snapshot::new(self.registry.clone(), self.history.clone()))
    }

    // ============================================================================
    // Mutations
    // ============================================================================

    /// Parks a vehicle in the given slot.
    ///
    /// Checks, in order: the vehicle is not already parked (`AlreadyParked`),
    /// every axis is in range (`OutOfRange`), the slot is free (`SlotTaken`).
    pub fn enter(&mut self, vehicle_id: &str, floor: i64, row: i64, col: i64) -> Result<Session> {
        let vehicle_id = check_vehicle_id(vehicle_id)?;
        if self.registry.is_active(vehicle_id) {
            tracing::warn!("[Allocation] Rejected entry: {} already parked", vehicle_id);
            return Err(ParkingError::already_parked(vehicle_id));
        }

        let slot = SlotAddress::new(floor, row, col)?;
        if !self.grid.is_free(slot) {
            tracing::warn!("[Allocation] Rejected entry: {} is taken", slot);
            return Err(ParkingError::SlotTaken {
                floor: slot.floor(),
                row: slot.row(),
                col: slot.col(),
            });
        }

        let session = Session::new(self.clock.now(), slot);
        let mut registry = self.registry.clone();
        registry.register(vehicle_id, session.clone())?;
        self.commit(registry, self.history.clone())?;

        tracing::info!("[Allocation] {} entered at {}", vehicle_id, slot);
        Ok(session)
    }

    /// Marks the vehicle's active session as a subscriber.
    ///
    /// The plan is not stored; it only determines what the counter shows.
    pub fn purchase_subscription(
        &mut self,
        vehicle_id: &str,
        plan: SubscriptionPlan,
    ) -> Result<()> {
        let mut registry = self.registry.clone();
        registry.lookup_mut(vehicle_id)?.subscriber = true;
        self.commit(registry, self.history.clone())?;

        tracing::info!(
            "[Allocation] {} purchased subscription plan {}",
            vehicle_id,
            plan.code()
        );
        Ok(())
    }

    /// Checks a vehicle out, charging it and moving its session to history.
    pub fn leave(&mut self, vehicle_id: &str) -> Result<Receipt> {
        let session = self.registry.lookup(vehicle_id)?.clone();
        let ended_at = self.clock.now();
        let fee = self
            .policy
            .compute(session.started_at, ended_at, session.subscriber)?;

        let mut registry = self.registry.clone();
        let mut history = self.history.clone();
        registry.remove(vehicle_id)?;
        history.append(vehicle_id, session.close(ended_at, fee));
        self.commit(registry, history)?;

        tracing::info!(
            "[Allocation] {} left {} (fee {})",
            vehicle_id,
            session.slot,
            fee
        );
        Ok(Receipt {
            vehicle_id: vehicle_id.to_string(),
            slot: session.slot,
            started_at: session.started_at,
            ended_at,
            subscriber: session.subscriber,
            fee,
        })
    }

    fn commit(&mut self, registry: VehicleRegistry, history: HistoryLog) -> Result<()> {
        let grid = OccupancyGrid::project(&registry)?;
        let snapshot = Snapshot::new(registry, history);
        if let Err(e) = self.repository.save(&snapshot) {
            tracing::error!("[Allocation] Failed to save snapshot: {}", e);
            return Err(e);
        }

        self.registry = snapshot.registry;
        self.history = snapshot.history;
        self.grid = grid;
        Ok(())
    }

    // ============================================================================
    // Queries
    // ============================================================================

    /// Fee the vehicle would pay if it left now.
    pub fn quote(&self, vehicle_id: &str) -> Result<Fee> {
        let session = self.registry.lookup(vehicle_id)?;
        self.policy
            .compute(session.started_at, self.clock.now(), session.subscriber)
    }

    pub fn free_count(&self, floor: i64) -> Result<usize> {
        self.grid.count_free(check_floor(floor)?)
    }

    /// Free-slot count for every floor.
    pub fn free_counts(&self) -> Vec<(u8, usize)> {
        free_counts(&self.grid)
    }

    pub fn is_slot_free(&self, floor: i64, row: i64, col: i64) -> Result<bool> {
        Ok(self.grid.is_free(SlotAddress::new(floor, row, col)?))
    }

    pub fn first_free(&self, floor: i64) -> Result<Option<SlotAddress>> {
        self.grid.first_free(check_floor(floor)?)
    }

    pub fn floor_view(&self, floor: i64) -> Result<Vec<Vec<bool>>> {
        self.grid.floor_view(check_floor(floor)?)
    }

    pub fn session(&self, vehicle_id: &str) -> Result<&Session> {
        self.registry.lookup(vehicle_id)
    }

    pub fn is_parked(&self, vehicle_id: &str) -> bool {
        self.registry.is_active(vehicle_id)
    }

    pub fn history(&self, vehicle_id: &str) -> &[SessionRecord] {
        self.history.records(vehicle_id)
    }

    pub fn active_sessions(&self) -> impl Iterator<Item = (&str, &Session)> {
        self.registry.iter()
    }

    pub fn total_revenue(&self) -> u64 {
        self.history.total_revenue()
    }

    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_core::clock::parse_timestamp;
    use parking_core::{InMemorySnapshotRepository, ManualClock};

    fn clock() -> ManualClock {
        ManualClock::new(parse_timestamp("2023-01-01 10:00").unwrap())
    }

    fn service(clock: &ManualClock) -> ParkingService<InMemorySnapshotRepository, &ManualClock> {
        ParkingService::with_clock(InMemorySnapshotRepository::new(), clock).unwrap()
    }

    #[test]
    fn test_enter_occupies_slot_and_persists() {
        let clock = clock();
        let mut service = service(&clock);

        let session = service.enter("car_num0", 1, 1, 4).unwrap();
        assert_eq!(session.slot.position(), 4);
        assert!(!session.subscriber);
        assert!(!service.is_slot_free(1, 1, 4).unwrap());
        assert_eq!(service.free_count(1).unwrap(), 99);

        let stored = service.repository.stored().unwrap();
        assert!(stored.registry.is_active("car_num0"));
    }

    #[test]
    fn test_enter_rejects_already_parked() {
        let clock = clock();
        let mut service = service(&clock);
        service.enter("car", 1, 1, 1).unwrap();

        let err = service.enter("car", 2, 1, 1).unwrap_err();
        assert!(err.is_already_parked());
        assert!(service.is_slot_free(2, 1, 1).unwrap());
    }

    #[test]
    fn test_enter_rejects_taken_slot_without_mutation() {
        let clock = clock();
        let mut service = service(&clock);
        service.enter("a", 2, 5, 5).unwrap();
        let before = service.repository.stored();

        let err = service.enter("b", 2, 5, 5).unwrap_err();
        assert_eq!(err, ParkingError::SlotTaken { floor: 2, row: 5, col: 5 });
        assert!(!service.is_parked("b"));
        assert_eq!(service.repository.stored(), before);
    }

    #[test]
    fn test_enter_rejects_out_of_range() {
        let clock = clock();
        let mut service = service(&clock);

        for (floor, row, col) in [(0, 1, 1), (4, 1, 1), (1, 0, 1), (1, 11, 1), (1, 1, 11)] {
            let err = service.enter("car", floor, row, col).unwrap_err();
            assert!(matches!(err, ParkingError::OutOfRange { .. }));
        }
        assert!(!service.is_parked("car"));
    }

    #[test]
    fn test_enter_rejects_empty_identifier() {
        let clock = clock();
        let mut service = service(&clock);
        assert_eq!(
            service.enter("", 1, 1, 1).unwrap_err(),
            ParkingError::InvalidVehicleId
        );
    }

    #[test]
    fn test_leave_charges_and_moves_to_history() {
        let clock = clock();
        let mut service = service(&clock);
        service.enter("car", 2, 1, 1).unwrap();

        clock.advance_minutes(120);
        let receipt = service.leave("car").unwrap();

        assert_eq!(receipt.fee, 6000);
        assert_eq!(receipt.elapsed_minutes(), 120);
        assert_eq!(receipt.ended_at, parse_timestamp("2023-01-01 12:00").unwrap());
        assert!(!service.is_parked("car"));
        assert!(service.is_slot_free(2, 1, 1).unwrap());

        let history = service.history("car");
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].fee, 6000);
        assert_eq!(history[0].slot, receipt.slot);
    }

    #[test]
    fn test_leave_appends_to_existing_history() {
        let clock = clock();
        let mut service = service(&clock);

        service.enter("car", 1, 1, 1).unwrap();
        clock.advance_minutes(10);
        service.leave("car").unwrap();

        service.enter("car", 1, 1, 2).unwrap();
        clock.advance_minutes(61);
        service.leave("car").unwrap();

        let fees: Vec<Fee> = service.history("car").iter().map(|r| r.fee).collect();
        assert_eq!(fees, vec![0, 5500]);
        assert_eq!(service.total_revenue(), 5500);
    }

    #[test]
    fn test_leave_unknown_vehicle_is_not_parked() {
        let clock = clock();
        let mut service = service(&clock);
        service.enter("other", 1, 1, 1).unwrap();
        let before = service.repository.stored();

        assert!(service.leave("ghost").unwrap_err().is_not_parked());
        assert!(service.history("ghost").is_empty());
        assert_eq!(service.repository.stored(), before);
    }

    #[test]
    fn test_subscription_halves_fee() {
        let clock = clock();
        let mut service = service(&clock);
        service.enter("member", 1, 1, 4).unwrap();
        service
            .purchase_subscription("member", SubscriptionPlan::OneMonth)
            .unwrap();
        assert!(service.session("member").unwrap().subscriber);

        clock.advance_minutes(180);
        assert_eq!(service.quote("member").unwrap(), 3500);
        let receipt = service.leave("member").unwrap();
        assert_eq!(receipt.fee, 3500);
        assert!(receipt.subscriber);
        assert!(service.history("member")[0].subscriber);
    }

    #[test]
    fn test_subscription_requires_active_session() {
        let clock = clock();
        let mut service = service(&clock);
        let err = service
            .purchase_subscription("ghost", SubscriptionPlan::SixMonths)
            .unwrap_err();
        assert!(err.is_not_parked());
    }

    #[test]
    fn test_failed_save_leaves_state_unchanged() {
        let clock = clock();
        let mut service = service(&clock);
        service.enter("car", 1, 1, 1).unwrap();

        service.repository.fail_saves(true);
        clock.advance_minutes(90);
        assert!(matches!(service.leave("car"), Err(ParkingError::Io { .. })));
        assert!(matches!(service.enter("b", 1, 1, 2), Err(ParkingError::Io { .. })));

        assert!(service.is_parked("car"));
        assert!(service.history("car").is_empty());
        assert!(service.is_slot_free(1, 1, 2).unwrap());
    }

    #[test]
    fn test_clock_going_backwards_is_invalid_duration() {
        let clock = clock();
        let mut service = service(&clock);
        service.enter("car", 1, 1, 1).unwrap();

        clock.advance_minutes(-30);
        let err = service.leave("car").unwrap_err();
        assert_eq!(err, ParkingError::InvalidDuration { minutes: -30 });
        assert!(service.is_parked("car"));
    }

    #[test]
    fn test_open_projects_grid_from_snapshot() {
        let start = parse_timestamp("2023-01-01 10:00").unwrap();
        let mut registry = VehicleRegistry::new();
        registry
            .register("a", Session::new(start, SlotAddress::from_position(1, 2).unwrap()))
            .unwrap();
        registry
            .register("b", Session::new(start, SlotAddress::from_position(3, 100).unwrap()))
            .unwrap();
        let repository =
            InMemorySnapshotRepository::with_snapshot(Snapshot::new(registry, HistoryLog::new()));

        let clock = clock();
        let service = ParkingService::with_clock(repository, &clock).unwrap();
        assert_eq!(service.free_counts(), vec![(1, 99), (2, 100), (3, 99)]);
        assert!(!service.is_slot_free(1, 1, 2).unwrap());
        assert!(!service.is_slot_free(3, 10, 10).unwrap());
        assert_eq!(service.first_free(1).unwrap().map(|s| s.position()), Some(1));
    }

    #[test]
    fn test_save_then_reopen_restores_state() {
        let clock = clock();
        let mut service = service(&clock);
        service.enter("member", 1, 1, 4).unwrap();
        service
            .purchase_subscription("member", SubscriptionPlan::OneMonth)
            .unwrap();
        service.enter("guest", 2, 3, 3).unwrap();
        clock.advance_minutes(120);
        service.leave("guest").unwrap();

        let free_counts = service.free_counts();
        let guest_history = service.history("guest").to_vec();

        service.repository = InMemorySnapshotRepository::new();
        service.save().unwrap();
        let reopened = ParkingService::with_clock(service.repository, &clock).unwrap();

        assert!(reopened.session("member").unwrap().subscriber);
        assert!(!reopened.is_parked("guest"));
        assert_eq!(reopened.free_counts(), free_counts);
        assert_eq!(reopened.history("guest"), guest_history.as_slice());
        assert_eq!(reopened.total_revenue(), 6000);
        assert_eq!(reopened.quote("member").unwrap(), 3000);
    }

    #[test]
    fn test_policy_override_applies_to_quote_and_leave() {
        let clock = clock();
        let policy = FeePolicy {
            daily_cap: 5000,
            ..FeePolicy::default()
        };
        let mut service = service(&clock).with_policy(policy);
        assert_eq!(service.policy().max_fee(false), 5000);

        service.enter("car", 1, 1, 1).unwrap();
        clock.advance_minutes(600);
        assert_eq!(service.now(), parse_timestamp("2023-01-01 20:00").unwrap());
        assert_eq!(service.quote("car").unwrap(), 5000);
        assert_eq!(service.leave("car").unwrap().fee, 5000);
    }

    #[test]
    fn test_floor_queries_validate_floor() {
        let clock = clock();
        let service = service(&clock);
        assert!(matches!(
            service.free_count(9),
            Err(ParkingError::OutOfRange { axis: "floor", .. })
        ));
        assert!(service.floor_view(0).is_err());
    }
}
