use std::time::Duration;

use torrust_transfer_manager_clock::clock::stopped::Stopped as _;
use torrust_transfer_manager_clock::clock::Time;

use crate::CurrentClock;

#[test]
fn it_should_use_stopped_time_for_testing() {
    assert_eq!(CurrentClock::dbg_clock_type(), "Stopped".to_owned());

    let time = CurrentClock::now();
    std::thread::sleep(Duration::from_millis(50));
    let time_2 = CurrentClock::now();

    assert_eq!(time, time_2);
}

#[test]
fn a_scheduled_start_one_hour_ahead_should_be_in_the_future() {
    CurrentClock::local_set(&Duration::from_secs(1_792_315_800));

    let scheduled_start = CurrentClock::now_add(&Duration::from_secs(3600)).unwrap();

    assert!(CurrentClock::is_future(&scheduled_start));

    CurrentClock::local_reset();
}
