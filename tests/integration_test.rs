mod common;

use anyhow::Result;
use common::{purge_service, retain_service, CAMRY_RATE};
use vettura::application::AppError;
use vettura::domain::RentalFilter;

#[test]
fn test_end_to_end_rental_cycle() -> Result<()> {
    let mut service = retain_service()?;

    let quote = service.quote_price("C001", 3)?;
    assert_eq!(quote, CAMRY_RATE * 3);

    let result = service.rent_car("C001", "Alice", None, 3)?;
    assert_eq!(result.rental.total_price, quote);
    assert_eq!(result.customer.name, "Alice");
    assert!(result.rental.is_open());

    // C001 is gone from the availability list while rented
    let available: Vec<String> = service
        .list_available_cars()
        .into_iter()
        .map(|c| c.id)
        .collect();
    assert_eq!(available, vec!["C002", "C003"]);

    let returned = service.return_car("C001")?;
    assert_eq!(returned.customer_name, "Alice");
    assert!(!returned.rental.is_open());

    let available: Vec<String> = service
        .list_available_cars()
        .into_iter()
        .map(|c| c.id)
        .collect();
    assert_eq!(available, vec!["C001", "C002", "C003"]);

    let stats = service.statistics();
    assert_eq!(stats.total_rentals, 1);
    assert_eq!(stats.active_rentals, 0);
    assert_eq!(stats.total_revenue, CAMRY_RATE * 3);

    Ok(())
}

#[test]
fn test_double_rent_fails_and_preserves_first_rental() -> Result<()> {
    let mut service = retain_service()?;

    service.rent_car("C001", "Alice", None, 3)?;
    let err = service.rent_car("C001", "Bob", None, 5).unwrap_err();
    assert!(matches!(err, AppError::CarUnavailable(_)));

    // First rental untouched, no Bob anywhere
    let active = service.search_rentals("", RentalFilter::ActiveOnly);
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].customer.name, "Alice");
    assert_eq!(active[0].rental.days, 3);
    assert_eq!(service.customers().len(), 1);
    assert_eq!(service.statistics().total_rentals, 1);

    Ok(())
}

#[test]
fn test_rent_unknown_car_is_unavailable() -> Result<()> {
    let mut service = retain_service()?;
    let err = service.rent_car("C999", "Alice", None, 3).unwrap_err();
    assert!(matches!(err, AppError::CarUnavailable(_)));
    Ok(())
}

#[test]
fn test_return_never_rented_car_mutates_nothing() -> Result<()> {
    let mut service = retain_service()?;

    let err = service.return_car("C001").unwrap_err();
    assert!(matches!(err, AppError::NotRented(_)));
    let err = service.return_car("C999").unwrap_err();
    assert!(matches!(err, AppError::NotRented(_)));

    assert_eq!(service.list_available_cars().len(), 3);
    assert_eq!(service.statistics().total_rentals, 0);
    assert!(service.search_rentals("", RentalFilter::All).is_empty());

    Ok(())
}

#[test]
fn test_failed_rent_creates_no_customer() -> Result<()> {
    let mut service = retain_service()?;

    let err = service.rent_car("C001", "", None, 3).unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)));
    let err = service.rent_car("C001", "Alice", None, 0).unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)));

    // All-or-nothing: no customer was registered, car still available
    assert!(service.customers().is_empty());
    assert_eq!(service.list_available_cars().len(), 3);

    // Sequential ids are unaffected by failed attempts
    let result = service.rent_car("C001", "Alice", None, 3)?;
    assert_eq!(result.customer.id, "CUS1");

    Ok(())
}

#[test]
fn test_quote_validation() -> Result<()> {
    let service = retain_service()?;

    let err = service.quote_price("C001", 0).unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)));
    let err = service.quote_price("C999", 3).unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)));

    Ok(())
}

#[test]
fn test_add_car_rejects_duplicates_and_bad_input() -> Result<()> {
    let mut service = retain_service()?;

    let err = service.add_car("C001", "Fiat", "Panda", 100000).unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)));
    let err = service.add_car("", "Fiat", "Panda", 100000).unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)));
    let err = service.add_car("C004", "Fiat", "Panda", -1).unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)));

    // Catalog unchanged by the rejected adds
    assert_eq!(service.list_cars().len(), 3);

    let car = service.add_car("C004", "Fiat", "Panda", 100000)?;
    assert!(car.available);
    assert_eq!(service.list_cars().len(), 4);

    Ok(())
}

#[test]
fn test_availability_matches_open_rentals() -> Result<()> {
    let mut service = retain_service()?;

    service.rent_car("C001", "Alice", None, 2)?;
    service.rent_car("C003", "Bob", None, 4)?;
    service.return_car("C001")?;

    // A car is available exactly when no open rental references it
    let open_car_ids: Vec<String> = service
        .search_rentals("", RentalFilter::ActiveOnly)
        .into_iter()
        .map(|view| view.car.id)
        .collect();
    for car in service.list_cars() {
        assert_eq!(
            car.available,
            !open_car_ids.contains(&car.id),
            "availability flag out of sync for {}",
            car.id
        );
    }

    Ok(())
}

#[test]
fn test_retain_policy_keeps_closed_rentals() -> Result<()> {
    let mut service = retain_service()?;

    service.rent_car("C001", "Alice", None, 3)?;
    service.return_car("C001")?;

    let all = service.search_rentals("", RentalFilter::All);
    assert_eq!(all.len(), 1);
    assert!(!all[0].rental.is_open());
    assert!(all[0].rental.returned_at.is_some());

    Ok(())
}

#[test]
fn test_purge_policy_drops_closed_rentals() -> Result<()> {
    let mut service = purge_service()?;

    service.rent_car("C001", "Alice", None, 3)?;
    service.return_car("C001")?;

    assert!(service.search_rentals("", RentalFilter::All).is_empty());
    // The car itself cycles back to available as usual
    assert_eq!(service.list_available_cars().len(), 3);

    Ok(())
}

#[test]
fn test_customer_history_is_per_record_not_per_name() -> Result<()> {
    let mut service = retain_service()?;

    let first = service.rent_car("C001", "Alice", None, 2)?;
    service.return_car("C001")?;
    let second = service.rent_car("C001", "Alice", None, 4)?;

    // Two rentals under the same name belong to two distinct customers
    assert_ne!(first.customer.id, second.customer.id);
    let history = service.rentals_for_customer(&first.customer.id);
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].days, 2);
    assert!(!history[0].is_open());

    Ok(())
}

#[test]
fn test_car_cycles_through_repeat_rentals() -> Result<()> {
    let mut service = retain_service()?;

    for expected_customer in ["CUS1", "CUS2", "CUS3"] {
        let result = service.rent_car("C002", "Dana", None, 1)?;
        assert_eq!(result.customer.id, expected_customer);
        service.return_car("C002")?;
    }

    let stats = service.statistics();
    assert_eq!(stats.total_rentals, 3);
    assert_eq!(stats.active_rentals, 0);
    assert_eq!(service.search_rentals("", RentalFilter::All).len(), 3);

    Ok(())
}
