//! Time and scheduling abstractions
//!
//! The menu primitives block the caller until the user answers, but they
//! must never starve other work on the same executor. Every wait goes
//! through [`Timebase::delay_ms`] or [`Timebase::yield_now`] so control
//! returns to the scheduler between polls.

/// Monotonic clock plus cooperative delay/yield
#[allow(async_fn_in_trait)]
pub trait Timebase {
    /// Milliseconds since an arbitrary fixed epoch (normally boot)
    ///
    /// Must never go backwards.
    fn now_ms(&self) -> u64;

    /// Suspend the caller for at least `ms` milliseconds
    async fn delay_ms(&mut self, ms: u32);

    /// Give other tasks a chance to run, then resume
    async fn yield_now(&mut self);

    /// Milliseconds elapsed since `since_ms`
    fn elapsed_ms(&self, since_ms: u64) -> u64 {
        self.now_ms().saturating_sub(since_ms)
    }
}

impl<T: Timebase + ?Sized> Timebase for &mut T {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }

    async fn delay_ms(&mut self, ms: u32) {
        (**self).delay_ms(ms).await
    }

    async fn yield_now(&mut self) {
        (**self).yield_now().await
    }
}

/// Timebase backed by `embassy-time` and the embassy executor
#[cfg(feature = "embassy")]
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyTimebase;

#[cfg(feature = "embassy")]
impl Timebase for EmbassyTimebase {
    fn now_ms(&self) -> u64 {
        embassy_time::Instant::now().as_millis()
    }

    async fn delay_ms(&mut self, ms: u32) {
        embassy_time::Timer::after_millis(u64::from(ms)).await
    }

    async fn yield_now(&mut self) {
        embassy_futures::yield_now().await
    }
}
