//! Order lifecycle rules, free of storage concerns.
//!
//! ```text
//! pending ──approve──▶ approved ──confirm payment──▶ confirmed ──complete──▶ completed
//!    │                    │
//!    └─reject / cancel──▶ cancelled ◀──cancel──┘
//! ```
//!
//! An order may also be created directly in `confirmed`. Whichever way an
//! order first reaches `confirmed`, that is where the food item is claimed
//! and the consumer is credited, once.

use thiserror::Error;

use crate::{
    entity::{food_items::FoodKind, orders::OrderStatus},
    error::AppError,
    money::Money,
};

/// Savings are estimated as twice the price paid.
pub const SAVINGS_MULTIPLIER: i64 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OrderError {
    #[error("Makanan tidak tersedia.")]
    NotAvailable,
    #[error("Tidak bisa memesan makanan sendiri.")]
    SelfOrderForbidden,
    #[error("Makanan sudah dipesan atau sedang diproses.")]
    AlreadyProcessing,
    #[error("Pesanan tidak ditemukan atau statusnya tidak sesuai.")]
    NotFoundOrWrongState,
    #[error("Anda tidak berhak mengubah pesanan ini.")]
    NotParticipant,
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::NotAvailable
            | OrderError::SelfOrderForbidden
            | OrderError::AlreadyProcessing => AppError::Conflict(err.to_string()),
            OrderError::NotFoundOrWrongState => AppError::NotFound(err.to_string()),
            OrderError::NotParticipant => AppError::Forbidden,
        }
    }
}

impl OrderStatus {
    /// Statuses that block another order on a for-sale item.
    pub const ACTIVE: [OrderStatus; 3] = [
        OrderStatus::Pending,
        OrderStatus::Approved,
        OrderStatus::Confirmed,
    ];

    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    pub fn can_become(self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Pending, Approved)
                | (Pending, Confirmed)
                | (Pending, Cancelled)
                | (Approved, Confirmed)
                | (Approved, Cancelled)
                | (Confirmed, Completed)
        )
    }
}

/// How the caller relates to an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Participant {
    Provider,
    Consumer,
}

impl Participant {
    pub fn of(actor_id: i64, consumer_id: i64, provider_id: i64) -> Option<Self> {
        if actor_id == consumer_id {
            Some(Participant::Consumer)
        } else if actor_id == provider_id {
            Some(Participant::Provider)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Approve,
    Reject,
    ConfirmPayment,
    Complete,
    Cancel,
}

impl Transition {
    pub const ALL: [Transition; 5] = [
        Transition::Approve,
        Transition::Reject,
        Transition::ConfirmPayment,
        Transition::Complete,
        Transition::Cancel,
    ];

    pub fn from_states(self) -> &'static [OrderStatus] {
        match self {
            Transition::Approve | Transition::Reject => &[OrderStatus::Pending],
            Transition::ConfirmPayment => &[OrderStatus::Approved],
            Transition::Complete => &[OrderStatus::Confirmed],
            Transition::Cancel => &[OrderStatus::Pending, OrderStatus::Approved],
        }
    }

    pub fn target(self) -> OrderStatus {
        match self {
            Transition::Approve => OrderStatus::Approved,
            Transition::Reject | Transition::Cancel => OrderStatus::Cancelled,
            Transition::ConfirmPayment => OrderStatus::Confirmed,
            Transition::Complete => OrderStatus::Completed,
        }
    }

    pub fn permits(self, participant: Participant) -> bool {
        match self {
            Transition::Approve | Transition::Reject => participant == Participant::Provider,
            Transition::ConfirmPayment | Transition::Cancel => {
                participant == Participant::Consumer
            }
            Transition::Complete => true,
        }
    }

    /// Only payment confirmation moves an existing order into `confirmed`.
    pub fn claims_item(self) -> bool {
        self.target() == OrderStatus::Confirmed
    }

    pub fn audit_action(self) -> &'static str {
        match self {
            Transition::Approve => "order_approve",
            Transition::Reject => "order_reject",
            Transition::ConfirmPayment => "order_confirm_payment",
            Transition::Complete => "order_complete",
            Transition::Cancel => "order_cancel",
        }
    }

    pub fn success_message(self) -> &'static str {
        match self {
            Transition::Approve => "Negosiasi berhasil disetujui!",
            Transition::Reject => "Negosiasi berhasil ditolak!",
            Transition::ConfirmPayment => "Pembayaran berhasil dikonfirmasi!",
            Transition::Complete => "Pesanan berhasil diselesaikan!",
            Transition::Cancel => "Pesanan berhasil dibatalkan.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementKind {
    /// For-sale item bought at its listed price.
    Purchase,
    /// Offer met the minimum price.
    Direct,
    /// Offer below the minimum, waits for the provider.
    Negotiation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub status: OrderStatus,
    pub amount: Money,
    pub kind: PlacementKind,
}

impl Placement {
    pub fn is_negotiation(&self) -> bool {
        self.kind == PlacementKind::Negotiation
    }

    pub fn message(&self) -> &'static str {
        match self.kind {
            PlacementKind::Purchase => "Pesanan jualan berhasil dibuat!",
            PlacementKind::Direct => "Pesanan berhasil dibuat!",
            PlacementKind::Negotiation => {
                "Negosiasi berhasil dikirim! Menunggu persetujuan dari donatur."
            }
        }
    }
}

/// Decides the initial status and amount of a new order.
///
/// Returns `None` when a donation order carries no offer. Sale orders ignore
/// the offer and use the listed price.
pub fn decide_placement(kind: FoodKind, listed: Money, offered: Option<Money>) -> Option<Placement> {
    match kind {
        FoodKind::Jualan => Some(Placement {
            status: OrderStatus::Confirmed,
            amount: listed,
            kind: PlacementKind::Purchase,
        }),
        FoodKind::Donasi => {
            let offered = offered?;
            let (status, kind) = if offered >= listed {
                (OrderStatus::Confirmed, PlacementKind::Direct)
            } else {
                (OrderStatus::Pending, PlacementKind::Negotiation)
            };
            Some(Placement {
                status,
                amount: offered,
                kind,
            })
        }
    }
}

/// Increments applied to the consumer when an order is first confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatisticsCredit {
    pub savings: i64,
    pub waste_grams: i64,
}

impl StatisticsCredit {
    pub fn new(amount: Money, weight_grams: i32) -> Self {
        Self {
            // Money::MAX keeps this far from overflow.
            savings: amount.get() * SAVINGS_MULTIPLIER,
            waste_grams: i64::from(weight_grams.max(0)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rp(amount: i64) -> Money {
        Money::new(amount).unwrap()
    }

    #[test]
    fn terminal_states_have_no_way_out() {
        let all = [
            OrderStatus::Pending,
            OrderStatus::Approved,
            OrderStatus::Confirmed,
            OrderStatus::Completed,
            OrderStatus::Cancelled,
        ];
        for from in all.into_iter().filter(|s| s.is_terminal()) {
            for to in all {
                assert!(!from.can_become(to), "{from:?} -> {to:?}");
            }
        }
    }

    #[test]
    fn no_transition_moves_backwards() {
        assert!(!OrderStatus::Approved.can_become(OrderStatus::Pending));
        assert!(!OrderStatus::Confirmed.can_become(OrderStatus::Approved));
        assert!(!OrderStatus::Confirmed.can_become(OrderStatus::Cancelled));
        assert!(!OrderStatus::Pending.can_become(OrderStatus::Completed));
    }

    #[test]
    fn every_transition_follows_an_edge() {
        for transition in Transition::ALL {
            for from in transition.from_states() {
                assert!(!from.is_terminal());
                assert!(
                    from.can_become(transition.target()),
                    "{transition:?} from {from:?}"
                );
            }
        }
    }

    #[test]
    fn only_payment_confirmation_claims_the_item() {
        let claiming: Vec<_> = Transition::ALL
            .into_iter()
            .filter(|t| t.claims_item())
            .collect();
        assert_eq!(claiming, vec![Transition::ConfirmPayment]);
    }

    #[test]
    fn transitions_respect_participants() {
        assert!(Transition::Approve.permits(Participant::Provider));
        assert!(!Transition::Approve.permits(Participant::Consumer));
        assert!(Transition::Reject.permits(Participant::Provider));
        assert!(!Transition::Reject.permits(Participant::Consumer));
        assert!(Transition::ConfirmPayment.permits(Participant::Consumer));
        assert!(!Transition::ConfirmPayment.permits(Participant::Provider));
        assert!(Transition::Complete.permits(Participant::Provider));
        assert!(Transition::Complete.permits(Participant::Consumer));
        assert!(Transition::Cancel.permits(Participant::Consumer));
        assert!(!Transition::Cancel.permits(Participant::Provider));
    }

    #[test]
    fn participant_is_resolved_from_ids() {
        assert_eq!(Participant::of(1, 1, 2), Some(Participant::Consumer));
        assert_eq!(Participant::of(2, 1, 2), Some(Participant::Provider));
        assert_eq!(Participant::of(3, 1, 2), None);
    }

    #[test]
    fn offer_at_or_above_minimum_confirms_directly() {
        let placement = decide_placement(FoodKind::Donasi, rp(10_000), Some(rp(12_000))).unwrap();
        assert_eq!(placement.status, OrderStatus::Confirmed);
        assert_eq!(placement.amount, rp(12_000));
        assert!(!placement.is_negotiation());

        let exact = decide_placement(FoodKind::Donasi, rp(10_000), Some(rp(10_000))).unwrap();
        assert_eq!(exact.status, OrderStatus::Confirmed);
    }

    #[test]
    fn offer_below_minimum_starts_a_negotiation() {
        let placement = decide_placement(FoodKind::Donasi, rp(10_000), Some(rp(5_000))).unwrap();
        assert_eq!(placement.status, OrderStatus::Pending);
        assert_eq!(placement.amount, rp(5_000));
        assert!(placement.is_negotiation());
        assert!(placement.message().contains("Menunggu persetujuan"));
    }

    #[test]
    fn donation_without_offer_is_undecided() {
        assert_eq!(decide_placement(FoodKind::Donasi, rp(10_000), None), None);
    }

    #[test]
    fn sale_uses_listed_price() {
        let placement = decide_placement(FoodKind::Jualan, rp(15_000), Some(rp(1))).unwrap();
        assert_eq!(placement.status, OrderStatus::Confirmed);
        assert_eq!(placement.amount, rp(15_000));
        assert_eq!(placement.kind, PlacementKind::Purchase);

        let no_offer = decide_placement(FoodKind::Jualan, rp(15_000), None).unwrap();
        assert_eq!(no_offer.amount, rp(15_000));
    }

    #[test]
    fn credit_doubles_amount_and_counts_weight() {
        let credit = StatisticsCredit::new(rp(12_000), 500);
        assert_eq!(credit.savings, 24_000);
        assert_eq!(credit.waste_grams, 500);
    }

    #[test]
    fn order_errors_map_to_http_errors() {
        assert!(matches!(
            AppError::from(OrderError::NotFoundOrWrongState),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            AppError::from(OrderError::AlreadyProcessing),
            AppError::Conflict(_)
        ));
        assert!(matches!(
            AppError::from(OrderError::NotParticipant),
            AppError::Forbidden
        ));
    }
}
