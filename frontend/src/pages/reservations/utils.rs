use crate::api::{PaymentStatus, Reservation, ReservationStatus};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReservationTab {
    #[default]
    Active,
    Upcoming,
    Completed,
}

impl ReservationTab {
    pub const ALL: [ReservationTab; 3] = [
        ReservationTab::Active,
        ReservationTab::Upcoming,
        ReservationTab::Completed,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ReservationTab::Active => "Ativas",
            ReservationTab::Upcoming => "Próximas",
            ReservationTab::Completed => "Concluídas",
        }
    }

    /// `Active` covers reservations already under way; `Upcoming` those
    /// still to start.
    pub fn includes(self, reservation: &Reservation, now: DateTime<Utc>) -> bool {
        match self {
            ReservationTab::Active => {
                reservation.status == ReservationStatus::Active && reservation.start_date <= now
            }
            ReservationTab::Upcoming => {
                reservation.status == ReservationStatus::Active && reservation.start_date > now
            }
            ReservationTab::Completed => reservation.status == ReservationStatus::Completed,
        }
    }
}

pub fn filter_reservations(
    reservations: &[Reservation],
    tab: ReservationTab,
    now: DateTime<Utc>,
) -> Vec<Reservation> {
    reservations
        .iter()
        .filter(|r| tab.includes(r, now))
        .cloned()
        .collect()
}

pub fn status_label(status: ReservationStatus) -> &'static str {
    match status {
        ReservationStatus::Active => "Ativa",
        ReservationStatus::Completed => "Concluída",
        ReservationStatus::Cancelled => "Cancelada",
    }
}

pub fn payment_label(status: PaymentStatus) -> &'static str {
    match status {
        PaymentStatus::Pending => "Pagamento pendente",
        PaymentStatus::Paid => "Pago",
        PaymentStatus::Cancelled => "Pagamento cancelado",
    }
}
