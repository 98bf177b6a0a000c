//! Demo catalog loaded at startup so the API is browsable immediately.

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;

use crate::auth::password::hash_password;
use crate::models::{NewCategory, NewEvent, NewTicketType, NewUser, SeatingMap};
use crate::store::{Store, StoreResult};

fn seed_date(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0)
        .single()
        .expect("valid seed date")
}

/// Populates an empty store with five categories, a demo organizer
/// (`admin` / `password123`), four events and their ticket inventory.
pub async fn seed_demo_data(store: &dyn Store) -> StoreResult<()> {
    let concerts = store
        .create_category(NewCategory {
            name: "Concerts".to_string(),
            icon: "music".to_string(),
        })
        .await?;
    store
        .create_category(NewCategory {
            name: "Theater".to_string(),
            icon: "drama-masks".to_string(),
        })
        .await?;
    let sports = store
        .create_category(NewCategory {
            name: "Sports".to_string(),
            icon: "trophy".to_string(),
        })
        .await?;
    let food = store
        .create_category(NewCategory {
            name: "Food & Drink".to_string(),
            icon: "utensils".to_string(),
        })
        .await?;
    store
        .create_category(NewCategory {
            name: "Workshops".to_string(),
            icon: "graduation-cap".to_string(),
        })
        .await?;

    let admin = store
        .create_user(NewUser {
            username: "admin".to_string(),
            password_hash: hash_password("password123").expect("seed password hashes"),
            email: "admin@boxoffice.dev".to_string(),
            full_name: "Boxoffice Admin".to_string(),
            is_organizer: true,
            avatar_url: Some("https://i.pravatar.cc/150?u=admin".to_string()),
        })
        .await?;

    let festival = store
        .create_event(NewEvent {
            title: "Harborline Music Festival".to_string(),
            description: "Three days of live acts across four stages on the waterfront."
                .to_string(),
            image_url: "https://picsum.photos/seed/harborline/1200/630".to_string(),
            location: "Pier 62, Seattle".to_string(),
            start_date: seed_date(2026, 9, 18, 17),
            end_date: seed_date(2026, 9, 20, 23),
            organizer_id: admin.id,
            category_id: concerts.id,
            is_featured: true,
            is_trending: true,
            has_seating: true,
            seating_map: Some(SeatingMap {
                rows: 10,
                cols: 20,
                unavailable_seats: vec![(2, 3), (2, 4), (5, 9), (5, 10)],
            }),
        })
        .await?;
    let derby = store
        .create_event(NewEvent {
            title: "City Derby Final".to_string(),
            description: "The season decider under the lights. One match, one trophy."
                .to_string(),
            image_url: "https://picsum.photos/seed/derby/1200/630".to_string(),
            location: "Riverbank Stadium, Manchester".to_string(),
            start_date: seed_date(2026, 10, 3, 19),
            end_date: seed_date(2026, 10, 3, 22),
            organizer_id: admin.id,
            category_id: sports.id,
            is_featured: false,
            is_trending: true,
            has_seating: true,
            seating_map: Some(SeatingMap {
                rows: 20,
                cols: 30,
                unavailable_seats: Vec::new(),
            }),
        })
        .await?;
    let tour = store
        .create_event(NewEvent {
            title: "Aurora Nights Tour".to_string(),
            description: "A full production arena show closing out the European leg."
                .to_string(),
            image_url: "https://picsum.photos/seed/aurora/1200/630".to_string(),
            location: "Halle Arena, Berlin".to_string(),
            start_date: seed_date(2026, 10, 24, 20),
            end_date: seed_date(2026, 10, 24, 23),
            organizer_id: admin.id,
            category_id: concerts.id,
            is_featured: true,
            is_trending: false,
            has_seating: false,
            seating_map: None,
        })
        .await?;
    let fair = store
        .create_event(NewEvent {
            title: "Street Food Fair".to_string(),
            description: "Forty vendors, tasting menus and live cooking demos all weekend."
                .to_string(),
            image_url: "https://picsum.photos/seed/foodfair/1200/630".to_string(),
            location: "Old Market Square, Lisbon".to_string(),
            start_date: seed_date(2026, 11, 7, 11),
            end_date: seed_date(2026, 11, 8, 22),
            organizer_id: admin.id,
            category_id: food.id,
            is_featured: false,
            is_trending: true,
            has_seating: false,
            seating_map: None,
        })
        .await?;

    let inventory = [
        (festival.id, "General Admission", Some("Access to all open stages"), 99, 1000, 850),
        (festival.id, "VIP Weekend", Some("Side-stage viewing and lounge access"), 199, 200, 150),
        (derby.id, "Upper Tier", None, 180, 4000, 3200),
        (derby.id, "Pitchside", Some("Rows 1 to 4, halfway line"), 350, 2000, 1500),
        (derby.id, "Hospitality Box", Some("Private box for ten with catering"), 1200, 40, 20),
        (tour.id, "Standing", None, 95, 6000, 5000),
        (tour.id, "Seated Reserve", Some("Reserved tiered seating"), 450, 500, 300),
        (fair.id, "Day Entry", None, 25, 5000, 4200),
        (fair.id, "Tasting Pass", Some("Entry plus ten tasting vouchers"), 75, 2500, 1800),
    ];
    for (event_id, name, description, price, quantity, available) in inventory {
        store
            .create_ticket_type(NewTicketType {
                event_id,
                name: name.to_string(),
                description: description.map(str::to_string),
                price: Decimal::from(price),
                quantity,
                available,
            })
            .await?;
    }

    Ok(())
}
