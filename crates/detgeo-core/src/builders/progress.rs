/// Build-pass progress events, emitted as elements are placed.
#[derive(Debug, Clone)]
pub enum BuildProgress {
    /// The build pass started; `units` is the number of stations or layer
    /// instances that will be placed.
    Started { units: u64 },
    /// One station or layer instance (with its children) was placed.
    UnitPlaced,
    /// The pass finished with a total element count.
    Finished { elements: usize },
}

pub type ProgressCallback<'a> = Box<dyn Fn(BuildProgress) + Send + Sync + 'a>;

/// Optional observer for build progress; a default reporter ignores events.
#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: BuildProgress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}
