/// A chart region that holds at most one live chart.
///
/// Binding always releases the previous chart first, so the number of live
/// charts never exceeds one. The counters let callers check that every
/// construction is paired with a release.
#[derive(Debug)]
pub struct ChartSurface<C> {
    name: &'static str,
    bound: Option<C>,
    constructed: u64,
    released: u64,
}

impl<C> ChartSurface<C> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            bound: None,
            constructed: 0,
            released: 0,
        }
    }

    pub fn bind(&mut self, chart: C) {
        self.release();
        self.bound = Some(chart);
        self.constructed += 1;
        tracing::debug!(surface = self.name, live = self.live_charts(), "chart bound");
    }

    pub fn release(&mut self) {
        if self.bound.take().is_some() {
            self.released += 1;
            tracing::debug!(surface = self.name, released = self.released, "chart released");
        }
    }

    pub fn chart(&self) -> Option<&C> {
        self.bound.as_ref()
    }

    pub fn live_charts(&self) -> u64 {
        self.constructed - self.released
    }

    #[cfg(test)]
    pub fn constructed(&self) -> u64 {
        self.constructed
    }

    #[cfg(test)]
    pub fn released(&self) -> u64 {
        self.released
    }
}
