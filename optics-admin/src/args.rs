//! Command line arguments

use optics_client::AppointmentFilter;
use optics_client::appointments::StatusFilter;

pub const USAGE: &str = "Usage: optics-admin <appointments|reviews|subscriptions> \
[--search Q] [--from DATE] [--to DATE] [--status S]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Appointments(AppointmentFilter),
    Reviews,
    Subscriptions,
}

/// Parse everything after the program name.
pub fn parse<I, S>(args: I) -> Result<Screen, String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut args = args.into_iter().map(Into::<String>::into);
    let screen = args.next().ok_or("Missing screen name")?;

    let mut filter = AppointmentFilter::default();
    let mut has_filter = false;
    while let Some(flag) = args.next() {
        let value = args
            .next()
            .ok_or_else(|| format!("Missing value for {}", flag))?;
        has_filter = true;
        match flag.as_str() {
            "--search" => filter.search = value,
            "--from" => filter.start_date = value,
            "--to" => filter.end_date = value,
            "--status" => filter.status = StatusFilter::parse(&value),
            other => return Err(format!("Unknown argument: {}", other)),
        }
    }

    match screen.as_str() {
        "appointments" => Ok(Screen::Appointments(filter)),
        "reviews" | "subscriptions" if has_filter => {
            Err(format!("Filters only apply to appointments, not {}", screen))
        }
        "reviews" => Ok(Screen::Reviews),
        "subscriptions" => Ok(Screen::Subscriptions),
        other => Err(format!("Unknown screen: {}", other)),
    }
}
