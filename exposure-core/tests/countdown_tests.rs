// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Backoff Countdown Tests
//!
//! Tokio time is paused; the wall clock behind the controller is moved by
//! hand and the countdown ticks pick it up.

mod common;

use std::time::Duration as StdDuration;

use chrono::Duration;
use tokio_stream::StreamExt;

use common::controller;

#[tokio::test(start_paused = true)]
async fn test_countdown_starts_at_remaining_seconds() {
    let (ctl, _clock) = controller();
    ctl.submit_failed_attempt().unwrap();
    ctl.submit_failed_attempt().unwrap();
    ctl.submit_failed_attempt().unwrap();

    let countdown = ctl.countdown();
    assert_eq!(countdown.current(), Some(20));
    assert!(countdown.is_running());
}

#[tokio::test(start_paused = true)]
async fn test_countdown_when_unlocked() {
    let (ctl, _clock) = controller();
    let countdown = ctl.countdown();
    assert_eq!(countdown.current(), None);
}

/// Scenario: a locked screen counts down to zero and unlocks
#[tokio::test(start_paused = true)]
async fn test_countdown_follows_wall_clock_until_unlocked() {
    let (ctl, clock) = controller();
    ctl.submit_failed_attempt().unwrap();
    ctl.submit_failed_attempt().unwrap();

    let mut countdown = ctl.countdown();
    assert_eq!(countdown.current(), Some(10));

    clock.advance(Duration::seconds(3));
    assert_eq!(countdown.changed().await, Some(Some(7)));

    clock.advance(Duration::seconds(7));
    assert_eq!(countdown.changed().await, Some(None));
}

#[tokio::test(start_paused = true)]
async fn test_equal_values_are_not_republished() {
    let (ctl, _clock) = controller();
    ctl.submit_failed_attempt().unwrap();

    let countdown = ctl.countdown();
    let mut rx = countdown.subscribe();
    let _ = rx.borrow_and_update();

    // Several ticks pass, the wall clock does not move
    tokio::time::sleep(StdDuration::from_secs(5)).await;

    assert!(!rx.has_changed().unwrap());
    assert_eq!(*rx.borrow(), Some(5));
}

#[tokio::test(start_paused = true)]
async fn test_reset_is_picked_up_on_next_tick() {
    let (ctl, _clock) = controller();
    ctl.submit_failed_attempt().unwrap();

    let mut countdown = ctl.countdown();
    ctl.reset().unwrap();

    assert_eq!(countdown.changed().await, Some(None));
}

#[tokio::test(start_paused = true)]
async fn test_stream_yields_current_then_changes() {
    let (ctl, clock) = controller();
    ctl.submit_failed_attempt().unwrap();

    let countdown = ctl.countdown();
    let mut stream = countdown.stream();
    assert_eq!(stream.next().await, Some(Some(5)));

    clock.advance(Duration::seconds(2));
    assert_eq!(stream.next().await, Some(Some(3)));
}

/// Scenario: the screen goes away while locked
#[tokio::test(start_paused = true)]
async fn test_dropping_countdown_stops_timer() {
    let (ctl, _clock) = controller();
    ctl.submit_failed_attempt().unwrap();

    let countdown = ctl.countdown();
    let mut rx = countdown.subscribe();
    drop(countdown);

    // Sender goes away once the aborted task is torn down
    assert!(rx.changed().await.is_err());
}
