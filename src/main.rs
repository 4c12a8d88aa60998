use chrono::TimeDelta;
use toki_logic::{
    BusinessCalendar, Error, Interval, IntervalSet, SessionBook, TemporalIndex, Unit,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "toki_logic=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let week = Interval::parse("2024-01-01", "2024-01-08")?;
    let weekend = IntervalSet::new([
        Interval::parse("2024-01-06", "2024-01-08")?,
        Interval::parse("2023-12-30", "2024-01-01")?,
    ]);
    let weekdays = &week - &weekend;
    println!("{}", weekdays);
    println!("{}", weekdays.duration());

    for day in weekdays.enumerate(Unit::Day)? {
        println!("  {}", day.date());
    }
    println!("-----------");

    let calendar = BusinessCalendar::default();
    println!("{:?}", calendar.business_days(&weekdays)?);

    let mut prices: TemporalIndex<i32> = TemporalIndex::from_entries([
        ("2024-01-04T09:00", 100),
        ("2024-01-04T11:30", 104),
        ("2024-01-05T09:00", 98),
    ])?;
    prices.insert("2024-01-05T15:30", 101)?;

    let (at, price) = prices.lookup_at_or_before("2024-01-05T10:00")?;
    println!("{} -> {}", at, price);

    let after = prices.lookup_strictly_after("2024-01-05T15:30");
    println!("{:?}", after);
    println!("-----------");

    let mut book = SessionBook::new(calendar);
    let day = book.day_of(at);
    println!("{}", day.sessions());
    println!(
        "{}",
        day.sessions()
            .shift(TimeDelta::minutes(-30))?
            .intersection(&Interval::until(at)?)
    );

    Ok(())
}
