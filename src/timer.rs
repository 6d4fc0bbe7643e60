//
// Copyright 2022-Present (c) Raja Lehtihet & Wael El Oraiby
//
// Redistribution and use in source and binary forms, with or without
// modification, are permitted provided that the following conditions are met:
//
// 1. Redistributions of source code must retain the above copyright notice,
// this list of conditions and the following disclaimer.
//
// 2. Redistributions in binary form must reproduce the above copyright notice,
// this list of conditions and the following disclaimer in the documentation
// and/or other materials provided with the distribution.
//
// 3. Neither the name of the copyright holder nor the names of its contributors
// may be used to endorse or promote products derived from this software without
// specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE
// ARE DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE
// LIABLE FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR
// CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF
// SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS
// INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN
// CONTRACT, STRICT LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE)
// ARISING IN ANY WAY OUT OF THE USE OF THIS SOFTWARE, EVEN IF ADVISED OF THE
// POSSIBILITY OF SUCH DAMAGE.
//
//! Interval and one-shot timers driven by the host loop.
use super::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
/// Handle of a scheduled timer.
pub struct TimerId(usize);

struct Task {
    id: TimerId,
    key: Option<String>,
    due: f64,
    interval: Option<f64>,
    alive: Option<Rc<dyn Fn() -> bool>>,
    callback: Callback,
}

#[derive(Default)]
/// Timer service. Time only advances through [`Timers::update`].
pub struct Timers {
    now: f64,
    next_id: usize,
    tasks: Vec<Task>,
}

impl Timers {
    /// Creates an empty service at time zero.
    pub fn new() -> Self { Self::default() }

    /// Time of the last update, in seconds.
    pub fn now(&self) -> f64 { self.now }

    fn push(&mut self, key: Option<String>, due: f64, interval: Option<f64>, callback: Callback) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.tasks.push(Task { id, key, due, interval, alive: None, callback });
        id
    }

    /// Runs `callback` every `interval` seconds, starting one interval from now.
    pub fn schedule_interval(&mut self, interval: f64, callback: impl Fn() + 'static) -> TimerId {
        let interval = interval.max(f64::EPSILON);
        self.push(None, self.now + interval, Some(interval), Rc::new(callback))
    }

    /// Like [`Timers::schedule_interval`], but the timer is dropped on the first update where `alive`
    /// returns `false`.
    pub fn schedule_interval_while(&mut self, interval: f64, alive: impl Fn() -> bool + 'static, callback: impl Fn() + 'static) -> TimerId {
        let id = self.schedule_interval(interval, callback);
        if let Some(task) = self.tasks.last_mut() {
            task.alive = Some(Rc::new(alive));
        }
        id
    }

    /// Removes a pending timer. Returns `false` if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    /// Runs `callback` once after `delay` seconds. A pending one-shot with the same `key` is superseded.
    pub fn schedule_once(&mut self, key: &str, delay: f64, callback: impl Fn() + 'static) -> TimerId {
        self.tasks.retain(|t| t.key.as_deref() != Some(key));
        self.push(Some(key.to_string()), self.now + delay, None, Rc::new(callback))
    }

    /// Moves the clock to `now` without firing anything. Pending timers are postponed by the skipped
    /// time, so a service that was not updated for a while resumes where it stopped.
    pub fn resume(&mut self, now: f64) {
        let skipped = now - self.now;
        if skipped <= 0.0 {
            return;
        }
        for t in &mut self.tasks {
            t.due += skipped;
        }
        self.now = now;
    }

    /// Returns `true` while `id` is pending.
    pub fn is_scheduled(&self, id: TimerId) -> bool { self.tasks.iter().any(|t| t.id == id) }

    /// Number of pending timers.
    pub fn len(&self) -> usize { self.tasks.len() }

    /// Returns `true` if no timer is pending.
    pub fn is_empty(&self) -> bool { self.tasks.is_empty() }

    /// Advances the clock to `now` and returns the callbacks that came due. Interval timers that missed
    /// several periods fire once.
    pub fn update(&mut self, now: f64) -> Fired {
        self.now = self.now.max(now);
        let mut fired = Fired::none();
        let now = self.now;
        self.tasks.retain_mut(|t| {
            if t.alive.as_ref().is_some_and(|alive| !alive()) {
                return false;
            }
            if t.due > now {
                return true;
            }
            fired.push(t.callback.clone());
            match t.interval {
                Some(interval) => {
                    while t.due <= now {
                        t.due += interval;
                    }
                    true
                }
                None => false,
            }
        });
        if !fired.is_empty() {
            trace!("timers: {} due at {:.3}", fired.len(), now);
        }
        fired
    }
}
