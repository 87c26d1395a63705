
use std::time::Instant;

pub const FPS_SAMPLE_COUNT: usize = 5;
pub const FPS_SAMPLE_COUNT_FLOAT: f32 = FPS_SAMPLE_COUNT as f32;

/// A frame time counter averaging its samples over the last few frames.
pub struct FpsCounter {

    counter: Instant,

    samples: [u32; FPS_SAMPLE_COUNT],
    current_frame: usize,
    delta_frame: u32, // unit microseconds
}

impl FpsCounter {

    pub fn new() -> FpsCounter {

        FpsCounter {
            counter: Instant::now(),
            samples: [0; FPS_SAMPLE_COUNT],
            current_frame: 0,
            delta_frame: 0,
        }
    }

    /// Call this function once per frame to update the inner status.
    pub fn tick_frame(&mut self) {

        let time_elapsed = self.counter.elapsed();
        self.counter = Instant::now();

        self.delta_frame = time_elapsed.subsec_micros();
        self.samples[self.current_frame] = self.delta_frame;
        self.current_frame = (self.current_frame + 1) % FPS_SAMPLE_COUNT;
    }

    /// Calculate the current average FPS.
    pub fn fps(&self) -> f32 {

        let sum: u32 = self.samples.iter().sum();
        1000_000.0_f32 / (sum as f32 / FPS_SAMPLE_COUNT_FLOAT)
    }

    /// Return the duration of the last frame in seconds.
    ///
    /// This function ignores the seconds part of the elapsed time, since it is mostly zero.
    pub fn delta_time(&self) -> f32 {
        self.delta_frame as f32 / 1000_000.0_f32 // time in second
    }
}
