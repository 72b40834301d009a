use crate::errors::{DatabaseError, Error, Result, ValidationError};
use crate::markings::{
    BoardStockMarking, Marking, MarkingRepositoryTrait, MarkingService, MarkingServiceTrait,
    SaveMarking, SaveMarkingOutcome, StockMarking,
};
use async_trait::async_trait;
use chrono::DateTime;
use std::sync::{Arc, Mutex};

// --- Mock MarkingRepository ---
#[derive(Clone, Default)]
struct MockMarkingRepository {
    rows: Arc<Mutex<Vec<SaveMarking>>>,
    deletes: Arc<Mutex<Vec<(String, i32, String)>>>,
    reject_foreign_key: bool,
}

#[async_trait]
impl MarkingRepositoryTrait for MockMarkingRepository {
    fn list_for_stock(&self, board_id: i32, symbol: &str) -> Result<Vec<StockMarking>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|m| m.board_id == board_id && m.symbol == symbol)
            .map(|m| StockMarking {
                id: m.user_id.clone(),
                name: m.user_id.clone(),
                avatar: "XX".to_string(),
                color: "bg-rose-500".to_string(),
                buy_price: m.buy_price,
                sell_price: m.sell_price,
            })
            .collect())
    }

    fn list_all(&self) -> Result<Vec<BoardStockMarking>> {
        unimplemented!()
    }

    async fn upsert(&self, marking: SaveMarking) -> Result<Marking> {
        if self.reject_foreign_key {
            return Err(DatabaseError::ForeignKeyViolation("board_id".to_string()).into());
        }
        let mut rows = self.rows.lock().unwrap();
        rows.retain(|m| {
            !(m.user_id == marking.user_id
                && m.board_id == marking.board_id
                && m.symbol == marking.symbol)
        });
        rows.push(marking.clone());
        let now = DateTime::from_timestamp(0, 0).unwrap().naive_utc();
        Ok(Marking {
            id: rows.len() as i32,
            user_id: marking.user_id,
            board_id: marking.board_id,
            symbol: marking.symbol,
            buy_price: marking.buy_price,
            sell_price: marking.sell_price,
            created_at: now,
            updated_at: now,
        })
    }

    async fn delete(&self, user_id: &str, board_id: i32, symbol: &str) -> Result<usize> {
        self.deletes
            .lock()
            .unwrap()
            .push((user_id.to_string(), board_id, symbol.to_string()));
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|m| !(m.user_id == user_id && m.board_id == board_id && m.symbol == symbol));
        Ok(before - rows.len())
    }
}

fn input(buy: Option<f64>, sell: Option<f64>) -> SaveMarking {
    SaveMarking {
        user_id: "u_alice001".to_string(),
        board_id: 1,
        symbol: "600519.SH".to_string(),
        buy_price: buy,
        sell_price: sell,
    }
}

#[tokio::test]
async fn test_save_upserts_one_marking_per_user() {
    let repo = MockMarkingRepository::default();
    let svc = MarkingService::new(Arc::new(repo.clone()));

    let first = svc.save_marking(input(Some(1500.0), None)).await.unwrap();
    assert!(matches!(first, SaveMarkingOutcome::Saved(ref m) if m.buy_price == Some(1500.0)));

    svc.save_marking(input(Some(1480.0), Some(1700.0)))
        .await
        .unwrap();

    let markings = svc.get_markings(1, "600519.SH").unwrap();
    assert_eq!(markings.len(), 1);
    assert_eq!(markings[0].buy_price, Some(1480.0));
    assert_eq!(markings[0].sell_price, Some(1700.0));
}

#[tokio::test]
async fn test_zero_price_is_stored_as_absent() {
    let repo = MockMarkingRepository::default();
    let svc = MarkingService::new(Arc::new(repo.clone()));

    svc.save_marking(input(Some(0.0), Some(1700.0))).await.unwrap();

    let markings = svc.get_markings(1, "600519.SH").unwrap();
    assert_eq!(markings[0].buy_price, None);
    assert_eq!(markings[0].sell_price, Some(1700.0));
}

#[tokio::test]
async fn test_empty_prices_remove_the_marking() {
    let repo = MockMarkingRepository::default();
    let svc = MarkingService::new(Arc::new(repo.clone()));
    svc.save_marking(input(Some(1500.0), None)).await.unwrap();

    let outcome = svc.save_marking(input(None, Some(0.0))).await.unwrap();

    assert_eq!(outcome, SaveMarkingOutcome::Removed);
    assert!(svc.get_markings(1, "600519.SH").unwrap().is_empty());
    assert_eq!(repo.deletes.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_missing_ids_are_rejected() {
    let svc = MarkingService::new(Arc::new(MockMarkingRepository::default()));

    let mut bad = input(Some(1.0), None);
    bad.board_id = 0;
    let err = svc.save_marking(bad).await.unwrap_err();
    assert!(matches!(err, Error::Validation(ValidationError::MissingField(_))));

    let mut bad = input(Some(1.0), None);
    bad.user_id = "  ".to_string();
    assert!(svc.save_marking(bad).await.is_err());
}

#[tokio::test]
async fn test_negative_price_is_rejected() {
    let svc = MarkingService::new(Arc::new(MockMarkingRepository::default()));
    let err = svc.save_marking(input(Some(-3.0), None)).await.unwrap_err();
    assert!(matches!(err, Error::Validation(ValidationError::InvalidInput(_))));
}

#[tokio::test]
async fn test_unknown_board_or_user_is_not_found() {
    let repo = MockMarkingRepository {
        reject_foreign_key: true,
        ..Default::default()
    };
    let svc = MarkingService::new(Arc::new(repo));
    let err = svc.save_marking(input(Some(10.0), None)).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}
