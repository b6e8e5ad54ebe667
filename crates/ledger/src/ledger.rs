use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use stockbook_core::{DomainError, DomainResult, FabricId, LineId, TransactionId};

use crate::department::Department;
use crate::fabric::Fabric;
use crate::line::InventoryLine;
use crate::quantity::Quantity;
use crate::seed;
use crate::transaction::{StockTransaction, TransactionKind};

/// The combined ledger state: fabric catalog, inventory lines and the
/// append-only transaction history.
///
/// Operations are deterministic and perform no IO. Persistence is the
/// repository's concern; the ledger only mutates in-memory collections and
/// records one transaction per successful mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ledger {
    fabrics: Vec<Fabric>,
    inventory: Vec<InventoryLine>,
    transactions: Vec<StockTransaction>,
}

impl Ledger {
    /// Assemble a ledger from previously persisted collections.
    pub fn new(
        fabrics: Vec<Fabric>,
        inventory: Vec<InventoryLine>,
        transactions: Vec<StockTransaction>,
    ) -> Self {
        Self {
            fabrics,
            inventory,
            transactions,
        }
    }

    /// Ledger holding the fixed first-run dataset and an empty history.
    pub fn seeded() -> Self {
        Self::new(seed::seed_fabrics(), seed::seed_inventory(), Vec::new())
    }

    pub fn fabrics(&self) -> &[Fabric] {
        &self.fabrics
    }

    pub fn inventory(&self) -> &[InventoryLine] {
        &self.inventory
    }

    pub fn transactions(&self) -> &[StockTransaction] {
        &self.transactions
    }

    /// Name of a catalog fabric, if known.
    pub fn fabric_name(&self, fabric_id: &FabricId) -> Option<&str> {
        self.fabrics
            .iter()
            .find(|f| f.id == *fabric_id)
            .map(|f| f.name.as_str())
    }

    /// Current quantity for one (fabric, department) pair; 0 when no line exists.
    pub fn quantity(&self, fabric_id: &FabricId, department: Department) -> u64 {
        self.find_line(fabric_id, department).map_or(0, |l| l.qty)
    }

    /// Snapshot of live quantities keyed by (fabric, department).
    pub fn quantities(&self) -> BTreeMap<(FabricId, Department), u64> {
        self.inventory
            .iter()
            .map(|l| ((l.fabric_id.clone(), l.department), l.qty))
            .collect()
    }

    /// Record newly received stock.
    ///
    /// Finds the line for the pair and increments it, or creates the line on
    /// first receipt. Appends exactly one ADD transaction and returns a copy
    /// of it. Post-condition: the pair's quantity equals its prior quantity
    /// plus `qty`.
    pub fn add_stock(
        &mut self,
        fabric_id: FabricId,
        department: Department,
        qty: Quantity,
        occurred_at: DateTime<Utc>,
    ) -> DomainResult<StockTransaction> {
        match self.find_line_mut(&fabric_id, department) {
            Some(line) => {
                line.qty = line
                    .qty
                    .checked_add(qty.get())
                    .ok_or_else(|| DomainError::invariant("stock quantity overflow"))?;
            }
            None => {
                self.inventory.push(InventoryLine {
                    id: LineId::generate(),
                    fabric_id: fabric_id.clone(),
                    department,
                    qty: qty.get(),
                });
            }
        }

        Ok(self.record(TransactionKind::Add, fabric_id, department, qty, occurred_at))
    }

    /// Dispatch stock out of a department.
    ///
    /// Rejected in full when no line exists for the pair or the line holds
    /// less than `qty`; failure leaves inventory and history unchanged. On
    /// success the line is decremented and exactly one DISPATCH transaction is
    /// appended.
    pub fn dispatch_stock(
        &mut self,
        fabric_id: FabricId,
        department: Department,
        qty: Quantity,
        occurred_at: DateTime<Utc>,
    ) -> DomainResult<StockTransaction> {
        let Some(line) = self.find_line_mut(&fabric_id, department) else {
            return Err(DomainError::insufficient_stock(qty.get(), 0));
        };
        if line.qty < qty.get() {
            return Err(DomainError::insufficient_stock(qty.get(), line.qty));
        }
        line.qty -= qty.get();

        Ok(self.record(TransactionKind::Dispatch, fabric_id, department, qty, occurred_at))
    }

    /// Fold a transaction history over a baseline inventory.
    ///
    /// ADD adds and DISPATCH subtracts per (fabric, department) pair. With the
    /// baseline this ledger started from, the result matches the live
    /// quantities exactly (rebuild support); with an empty baseline it yields
    /// the net movement per pair. A history that would drive a quantity
    /// negative is corrupt and is reported as an invariant violation.
    pub fn replay(
        baseline: &[InventoryLine],
        transactions: &[StockTransaction],
    ) -> DomainResult<BTreeMap<(FabricId, Department), u64>> {
        let mut quantities: BTreeMap<(FabricId, Department), u64> = baseline
            .iter()
            .map(|l| ((l.fabric_id.clone(), l.department), l.qty))
            .collect();

        for txn in transactions {
            let key = (txn.fabric_id.clone(), txn.department);
            let entry = quantities.entry(key).or_insert(0);
            *entry = match txn.kind {
                TransactionKind::Add => entry
                    .checked_add(txn.qty)
                    .ok_or_else(|| DomainError::invariant("replayed quantity overflow"))?,
                TransactionKind::Dispatch => entry.checked_sub(txn.qty).ok_or_else(|| {
                    DomainError::invariant("replayed history drives quantity negative")
                })?,
            };
        }

        Ok(quantities)
    }

    fn find_line(&self, fabric_id: &FabricId, department: Department) -> Option<&InventoryLine> {
        self.inventory
            .iter()
            .find(|l| l.fabric_id == *fabric_id && l.department == department)
    }

    fn find_line_mut(
        &mut self,
        fabric_id: &FabricId,
        department: Department,
    ) -> Option<&mut InventoryLine> {
        self.inventory
            .iter_mut()
            .find(|l| l.fabric_id == *fabric_id && l.department == department)
    }

    fn record(
        &mut self,
        kind: TransactionKind,
        fabric_id: FabricId,
        department: Department,
        qty: Quantity,
        occurred_at: DateTime<Utc>,
    ) -> StockTransaction {
        let txn = StockTransaction {
            id: TransactionId::generate(),
            kind,
            fabric_id,
            department,
            qty: qty.get(),
            occurred_at,
        };
        self.transactions.push(txn.clone());
        txn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn fid(s: &str) -> FabricId {
        FabricId::new(s)
    }

    fn qty(n: u64) -> Quantity {
        Quantity::new(n).unwrap()
    }

    fn test_time() -> DateTime<Utc> {
        Utc::now()
    }

    #[test]
    fn add_increments_existing_line_and_records_transaction() {
        let mut ledger = Ledger::seeded();
        assert_eq!(ledger.quantity(&fid("f1"), Department::Tl), 120);

        let txn = ledger
            .add_stock(fid("f1"), Department::Tl, qty(30), test_time())
            .unwrap();

        assert_eq!(ledger.quantity(&fid("f1"), Department::Tl), 150);
        assert_eq!(ledger.transactions().len(), 1);
        assert_eq!(txn.kind, TransactionKind::Add);
        assert_eq!(txn.fabric_id, fid("f1"));
        assert_eq!(txn.department, Department::Tl);
        assert_eq!(txn.qty, 30);
    }

    #[test]
    fn add_creates_line_for_new_pair() {
        let mut ledger = Ledger::seeded();
        // f3 has no line anywhere yet.
        assert_eq!(ledger.quantity(&fid("f3"), Department::Swatches), 0);

        ledger
            .add_stock(fid("f3"), Department::Swatches, qty(40), test_time())
            .unwrap();

        assert_eq!(ledger.quantity(&fid("f3"), Department::Swatches), 40);
        let lines: Vec<_> = ledger
            .inventory()
            .iter()
            .filter(|l| l.fabric_id == fid("f3"))
            .collect();
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn add_accepts_fabric_missing_from_catalog() {
        let mut ledger = Ledger::seeded();
        ledger
            .add_stock(fid("f9"), Department::Tl, qty(5), test_time())
            .unwrap();

        assert_eq!(ledger.quantity(&fid("f9"), Department::Tl), 5);
        assert_eq!(ledger.fabric_name(&fid("f9")), None);
    }

    #[test]
    fn dispatch_decrements_and_records_transaction() {
        let mut ledger = Ledger::seeded();

        let txn = ledger
            .dispatch_stock(fid("f2"), Department::Tl, qty(30), test_time())
            .unwrap();

        assert_eq!(ledger.quantity(&fid("f2"), Department::Tl), 50);
        assert_eq!(txn.kind, TransactionKind::Dispatch);
        assert_eq!(txn.qty, 30);
    }

    #[test]
    fn dispatch_exceeding_stock_is_rejected_in_full() {
        let mut ledger = Ledger::seeded();
        let before = ledger.clone();

        let err = ledger
            .dispatch_stock(fid("f1"), Department::Tl, qty(200), test_time())
            .unwrap_err();

        assert_eq!(
            err,
            DomainError::InsufficientStock {
                requested: 200,
                available: 120,
            }
        );
        assert_eq!(ledger, before);
    }

    #[test]
    fn dispatch_against_absent_line_is_rejected() {
        let mut ledger = Ledger::seeded();
        let before = ledger.clone();

        let err = ledger
            .dispatch_stock(fid("f3"), Department::Tl, qty(1), test_time())
            .unwrap_err();

        assert_eq!(
            err,
            DomainError::InsufficientStock {
                requested: 1,
                available: 0,
            }
        );
        assert_eq!(ledger, before);
    }

    #[test]
    fn dispatch_can_drain_line_to_zero() {
        let mut ledger = Ledger::seeded();
        ledger
            .dispatch_stock(fid("f2"), Department::Tl, qty(80), test_time())
            .unwrap();

        assert_eq!(ledger.quantity(&fid("f2"), Department::Tl), 0);
        // The line stays around at zero; it is not removed.
        assert!(ledger
            .inventory()
            .iter()
            .any(|l| l.fabric_id == fid("f2") && l.department == Department::Tl));
    }

    #[test]
    fn worked_example_add_then_overdispatch_then_dispatch() {
        let mut ledger = Ledger::seeded();

        ledger
            .add_stock(fid("f1"), Department::Tl, qty(30), test_time())
            .unwrap();
        assert_eq!(ledger.quantity(&fid("f1"), Department::Tl), 150);

        ledger
            .dispatch_stock(fid("f1"), Department::Tl, qty(200), test_time())
            .unwrap_err();
        assert_eq!(ledger.quantity(&fid("f1"), Department::Tl), 150);
        assert_eq!(ledger.transactions().len(), 1);

        ledger
            .dispatch_stock(fid("f1"), Department::Tl, qty(50), test_time())
            .unwrap();
        assert_eq!(ledger.quantity(&fid("f1"), Department::Tl), 100);

        let kinds: Vec<_> = ledger.transactions().iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![TransactionKind::Add, TransactionKind::Dispatch]);
    }

    #[test]
    fn fabric_name_looks_up_catalog() {
        let ledger = Ledger::seeded();
        assert_eq!(ledger.fabric_name(&fid("f1")), Some("Egyptian Cotton"));
        assert_eq!(ledger.fabric_name(&fid("nope")), None);
    }

    #[test]
    fn seeded_quantities_match_opening_stock() {
        let ledger = Ledger::seeded();
        assert_eq!(ledger.quantity(&fid("f1"), Department::Tl), 120);
        assert_eq!(ledger.quantity(&fid("f2"), Department::Tl), 80);
        assert_eq!(ledger.quantity(&fid("f1"), Department::Swatches), 200);
        assert!(ledger.transactions().is_empty());
    }

    #[test]
    fn replay_of_empty_baseline_reproduces_added_stock() {
        let mut ledger = Ledger::new(Vec::new(), Vec::new(), Vec::new());
        ledger
            .add_stock(fid("f1"), Department::Tl, qty(10), test_time())
            .unwrap();
        ledger
            .add_stock(fid("f1"), Department::Tl, qty(5), test_time())
            .unwrap();
        ledger
            .dispatch_stock(fid("f1"), Department::Tl, qty(3), test_time())
            .unwrap();

        let replayed = Ledger::replay(&[], ledger.transactions()).unwrap();
        assert_eq!(replayed, ledger.quantities());
        assert_eq!(replayed[&(fid("f1"), Department::Tl)], 12);
    }

    #[test]
    fn replay_rejects_history_that_goes_negative() {
        let history = vec![StockTransaction {
            id: TransactionId::new("t1"),
            kind: TransactionKind::Dispatch,
            fabric_id: fid("f1"),
            department: Department::Tl,
            qty: 1,
            occurred_at: test_time(),
        }];

        let err = Ledger::replay(&[], &history).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }

    /// One randomly chosen operation against a fixed small universe of pairs.
    #[derive(Debug, Clone)]
    enum Op {
        Add { fabric: usize, dept: usize, qty: u64 },
        Dispatch { fabric: usize, dept: usize, qty: u64 },
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        let add = (0usize..4, 0usize..2, 1u64..500)
            .prop_map(|(fabric, dept, qty)| Op::Add { fabric, dept, qty });
        let dispatch = (0usize..4, 0usize..2, 1u64..500)
            .prop_map(|(fabric, dept, qty)| Op::Dispatch { fabric, dept, qty });
        prop_oneof![add, dispatch]
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: any operation sequence preserves pair uniqueness, keeps
        /// history length equal to the number of successful operations, and
        /// keeps the replay law (baseline + history == live quantities).
        #[test]
        fn operation_sequences_preserve_invariants(ops in prop::collection::vec(op_strategy(), 0..40)) {
            let fabric_ids = ["f1", "f2", "f3", "f9"];

            let mut ledger = Ledger::seeded();
            let baseline = ledger.inventory().to_vec();
            let mut successes = 0usize;

            for op in ops {
                let result = match op {
                    Op::Add { fabric, dept, qty: n } => ledger.add_stock(
                        fid(fabric_ids[fabric]),
                        Department::ALL[dept],
                        qty(n),
                        test_time(),
                    ),
                    Op::Dispatch { fabric, dept, qty: n } => ledger.dispatch_stock(
                        fid(fabric_ids[fabric]),
                        Department::ALL[dept],
                        qty(n),
                        test_time(),
                    ),
                };
                if result.is_ok() {
                    successes += 1;
                }
            }

            // Pair uniqueness.
            let mut pairs: Vec<_> = ledger
                .inventory()
                .iter()
                .map(|l| (l.fabric_id.clone(), l.department))
                .collect();
            pairs.sort();
            let before_dedup = pairs.len();
            pairs.dedup();
            prop_assert_eq!(before_dedup, pairs.len());

            // Exactly one transaction per successful operation.
            prop_assert_eq!(ledger.transactions().len(), successes);
            prop_assert!(ledger.transactions().iter().all(|t| t.qty > 0));

            // Replay law against the starting inventory.
            let replayed = Ledger::replay(&baseline, ledger.transactions()).unwrap();
            prop_assert_eq!(replayed, ledger.quantities());
        }
    }
}
