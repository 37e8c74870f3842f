//! Bounded text formatting for the sample report

use core::fmt::{self, Write};

use heapless::String;

use crate::config::SAMPLES_PER_UPDATE;
use crate::sampling::AxisAverage;
use crate::sensors::AccelSample;

/// `fmt::Write` adapter that fills a fixed-capacity string and silently
/// drops everything past its capacity.
///
/// Once a character fails to fit, all later writes are discarded too, so the
/// buffer always holds a prefix of the formatted output.
pub struct TruncatingWriter<'a, const N: usize> {
    buf: &'a mut String<N>,
    truncated: bool,
}

impl<'a, const N: usize> TruncatingWriter<'a, N> {
    /// Clear `buf` and start writing into it.
    pub fn new(buf: &'a mut String<N>) -> Self {
        buf.clear();
        Self {
            buf,
            truncated: false,
        }
    }

    /// Whether any output was dropped.
    pub fn truncated(&self) -> bool {
        self.truncated
    }
}

impl<const N: usize> Write for TruncatingWriter<'_, N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.truncated {
            return Ok(());
        }
        for c in s.chars() {
            if self.buf.push(c).is_err() {
                self.truncated = true;
                break;
            }
        }
        Ok(())
    }
}

/// Write the sample report into `buf`:
///
/// ```text
/// N X,Y,Z
/// 0 x,y,z
/// 1 x,y,z
/// 2 x,y,z
/// A x y z
/// ```
///
/// Returns `true` if the report did not fit and was truncated.
pub fn write_sample_report<const N: usize>(
    buf: &mut String<N>,
    batch: &[AccelSample; SAMPLES_PER_UPDATE],
    avg: &AxisAverage,
) -> bool {
    let mut w = TruncatingWriter::new(buf);

    // The writer never fails, overflow only sets the truncated flag.
    let _ = w.write_str("N X,Y,Z");
    for (i, sample) in batch.iter().enumerate() {
        let _ = write!(w, "\n{} {}", i, sample);
    }
    let _ = write!(w, "\nA {} {} {}", avg.x, avg.y, avg.z);

    w.truncated()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DisplayText;
    use crate::sampling::average;

    fn reference_batch() -> [AccelSample; 3] {
        [
            AccelSample::new(100, -50, 0),
            AccelSample::new(103, -49, 1),
            AccelSample::new(101, -51, -1),
        ]
    }

    #[test]
    fn test_report_layout() {
        let batch = reference_batch();
        let mut buf = DisplayText::new();
        let truncated = write_sample_report(&mut buf, &batch, &average(&batch));

        assert!(!truncated);
        assert_eq!(
            buf.as_str(),
            "N X,Y,Z\n0 100,-50,0\n1 103,-49,1\n2 101,-51,-1\nA 101 -50 0"
        );
        assert_eq!(buf.lines().count(), 5);
        assert_eq!(buf.lines().last(), Some("A 101 -50 0"));
    }

    #[test]
    fn test_widest_report_fits_display_text() {
        let batch = [AccelSample::new(i16::MIN, i16::MIN, i16::MIN); 3];
        let mut buf = DisplayText::new();
        let truncated = write_sample_report(&mut buf, &batch, &average(&batch));

        assert!(!truncated);
        assert_eq!(buf.split('\n').count(), 5);
        assert_eq!(buf.lines().last(), Some("A -32768 -32768 -32768"));
    }

    #[test]
    fn test_small_buffer_truncates_to_prefix() {
        let batch = reference_batch();
        let mut buf = String::<16>::new();
        let truncated = write_sample_report(&mut buf, &batch, &average(&batch));

        assert!(truncated);
        assert_eq!(buf.len(), 16);
        assert_eq!(buf.as_str(), "N X,Y,Z\n0 100,-5");
    }

    #[test]
    fn test_writer_stops_after_first_overflow() {
        let mut buf = String::<4>::new();
        let mut w = TruncatingWriter::new(&mut buf);
        // 'é' is two bytes and does not fit after "abc", the later 'd' would
        w.write_str("abcé").unwrap();
        w.write_str("d").unwrap();
        assert!(w.truncated());
        assert_eq!(buf.as_str(), "abc");
    }

    #[test]
    fn test_writer_clears_previous_content() {
        let mut buf = String::<8>::new();
        buf.push_str("stale").unwrap();
        let mut w = TruncatingWriter::new(&mut buf);
        w.write_str("new").unwrap();
        assert!(!w.truncated());
        assert_eq!(buf.as_str(), "new");
    }
}
