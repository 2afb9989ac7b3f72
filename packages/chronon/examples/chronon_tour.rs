//! A quick tour: calendar arithmetic, incremental timestamp rendering and a calibrated cycle
//! counter clock.

use chronon::{Clock, CpuCounterFenced, Date, Realtime, Timestamp, Weekday};

fn main() -> Result<(), chronon::Error> {
    // Calendar arithmetic without tables or loops.
    let date = Date::from_ymd(2024, 5, 26)?;
    assert_eq!(date.to_rata_die(), 19_869);
    assert_eq!(date.weekday(), Weekday::Sunday);

    // Render wall-clock time, rewriting only the digits that change.
    let mut clock = Clock::<Realtime>::new()?;
    let mut timestamp = Timestamp::new(clock.wall_nanos(clock.last()));

    for _ in 0..5 {
        let now = clock.now()?;
        timestamp.update(clock.wall_nanos(now));

        println!("{timestamp}");
    }

    // Cycle counter clocks are calibrated when created, which takes at least 50 ms.
    let mut counter = Clock::<CpuCounterFenced>::new()?;

    let start = counter.now()?;
    let end = counter.now()?;

    println!(
        "Counter runs at {:.0} ticks per second; two fenced reads took {} ns",
        counter.ticks_per_second(),
        counter.ticks_to_nanos(end - start)
    );

    Ok(())
}
