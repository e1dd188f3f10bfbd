use stayhub_domain::{BookingBucket, Displayable};

use crate::cli::output;
use crate::{App, AppError};

pub async fn list_properties(app: &App) -> Result<(), AppError> {
    let properties = app.listing().list().await?;
    if properties.is_empty() {
        output::info("You have not listed any properties yet.");
        return Ok(());
    }
    output::section("My properties");
    for property in properties {
        output::info(format!("{}  {}", property.id, property.display_label()));
    }
    Ok(())
}

pub async fn delete_property(app: &App, id: &str) -> Result<(), AppError> {
    app.listing().delete(id).await?;
    output::success(format!("Property `{id}` deleted."));
    Ok(())
}

pub async fn bookings(app: &App) -> Result<(), AppError> {
    let buckets = app.bookings().load().await?;
    for bucket in [
        BookingBucket::Upcoming,
        BookingBucket::Completed,
        BookingBucket::Cancelled,
    ] {
        let entries = buckets.get(bucket);
        output::section(format!("{bucket} ({})", entries.len()));
        for booking in entries {
            output::info(booking.display_label());
        }
    }
    Ok(())
}
