use colored::Colorize;

use std::fs::File;
use std::io::prelude::*;
use std::path::Path;
use std::time::Instant;

use crate::{
    error::Result,
    IncrementalForest,
    MemberTrainer,
    Sample,
};

const WIDTH: usize = 8;
const PREC_WIDTH: usize = 5;
const FULL_WIDTH: usize = 60;
const STAT_WIDTH: usize = (FULL_WIDTH - 4) / 2;
const HEADER: &str = "Batch,Weight,Members,TrainAccuracy,TestAccuracy,Time\n";


/// Struct `Logger` feeds a sequence of batches to an
/// [`IncrementalForest`] and reports, for each batch,
/// the accuracy on the batch itself, the accuracy on a fixed test set,
/// and the cumulative training time.
///
/// # Example
/// ```no_run
/// use incforest::prelude::*;
/// use incforest::research::Logger;
///
/// let read = |file| SampleReader::default()
///     .file(file)
///     .has_header(true)
///     .target_feature("class")
///     .read()
///     .unwrap();
/// let (old, new, test) = (read("old.csv"), read("new.csv"), read("test.csv"));
///
/// let trainer = RandomForestBuilder::new().build().unwrap();
/// let forest = IncrementalForest::new(trainer, 50).unwrap();
///
/// let forest = Logger::new(forest, &test)
///     .run_with_log([(&old, 1), (&new, 2)], "log.csv")
///     .unwrap();
/// ```
pub struct Logger<'a, T: MemberTrainer> {
    forest: IncrementalForest<T>,
    test: &'a Sample,
    verbose: bool,
}


impl<'a, T> Logger<'a, T>
    where T: MemberTrainer,
          T::Member: Sync,
{
    /// Create a new instance of `Logger`.
    pub fn new(forest: IncrementalForest<T>, test: &'a Sample) -> Self {
        Self { forest, test, verbose: true, }
    }


    /// Print the table to stdout or not.
    /// Default is `true`.
    pub fn verbose(mut self, flag: bool) -> Self {
        self.verbose = flag;
        self
    }


    /// Feed `batches` to the forest and print the log.
    /// Returns the updated forest.
    pub fn run<'b, I>(mut self, batches: I) -> Result<IncrementalForest<T>>
        where I: IntoIterator<Item = (&'b Sample, u32)>,
    {
        self.drive(batches, None)?;
        Ok(self.forest)
    }


    /// Same as [`Logger::run`], and writes each row
    /// to `filename` as CSV.
    pub fn run_with_log<'b, I, P>(mut self, batches: I, filename: P)
        -> Result<IncrementalForest<T>>
        where I: IntoIterator<Item = (&'b Sample, u32)>,
              P: AsRef<Path>,
    {
        let mut file = File::create(filename)?;
        file.write_all(HEADER.as_bytes())?;
        self.drive(batches, Some(&mut file))?;
        Ok(self.forest)
    }


    fn drive<'b, I>(&mut self, batches: I, mut file: Option<&mut File>)
        -> Result<()>
        where I: IntoIterator<Item = (&'b Sample, u32)>,
    {
        if self.verbose {
            self.print_stats();
            self.print_log_header();
        }

        let mut time_acc = 0;
        for (sample, weight) in batches {
            let now = Instant::now();

            if self.forest.n_batches() == 0 {
                self.forest.fit(sample, weight)?;
            } else {
                self.forest.update(sample, weight)?;
            }

            time_acc += now.elapsed().as_millis();

            let batch = self.forest.n_batches();
            let members = self.forest.ensemble().len();
            let train = self.forest.score(sample)?;
            let test = self.forest.score(self.test)?;

            if let Some(file) = file.as_mut() {
                let line = format!(
                    "{batch},{weight},{members},{train},{test},{time_acc}\n"
                );
                file.write_all(line.as_bytes())?;
            }

            if self.verbose {
                println!(
                    "{} {}\t{}\t{}\t{}\t{}\t{}",
                    "[LOG]".bold().magenta(),
                    format!("{:>WIDTH$}", batch).red(),
                    format!("{:>WIDTH$}", weight).blue(),
                    format!("{:>WIDTH$}", members).white(),
                    format!("{:>WIDTH$.PREC_WIDTH$}", train).green(),
                    format!("{:>WIDTH$.PREC_WIDTH$}", test).yellow(),
                    time_format(time_acc).bold().cyan(),
                );
            }
        }

        if self.verbose {
            println!(
                "{} {} batches, {} members\n",
                "[FIN]".bold().bright_green(),
                self.forest.n_batches(),
                self.forest.ensemble().len(),
            );
        }
        Ok(())
    }


    fn print_log_header(&self) {
        println!(
            "      {:>WIDTH$}\t{:>WIDTH$}\t{:>WIDTH$}\t{:>WIDTH$}\t{:>WIDTH$}\t{:>WIDTH$}",
            "".bold().red(),
            "VOTE".bold().blue(),
            "#".bold().white(),
            "TRAIN".bold().green(),
            "TEST".bold().yellow(),
            "ACC.".bold().cyan(),
        );
        println!(
            "      {:>WIDTH$}\t{:>WIDTH$}\t{:>WIDTH$}\t{:>WIDTH$}\t{:>WIDTH$}\t{:>WIDTH$}\n",
            "BATCH".bold().red(),
            "WEIGHT".bold().blue(),
            "MEMBERS".bold().white(),
            "ACC.".bold().green(),
            "ACC.".bold().yellow(),
            "TIME".bold().cyan(),
        );
    }


    fn print_stats(&self) {
        let header = format!(
            "{:=>FULL_WIDTH$}\n{:^FULL_WIDTH$}\n{:->FULL_WIDTH$}",
            "", "STATS".bold(), "",
        );
        let trainer = self.forest.trainer();
        println!(
            "\n{header}\n\
            + {:<STAT_WIDTH$}\t{:>STAT_WIDTH$}",
            "Trainer".bold(),
            trainer.name().bold().green(),
        );

        if let Some(info) = trainer.info() {
            let line = info.into_iter()
                .map(|(key, val)| {
                    format!(
                        "    + {:<STAT_WIDTH$}\t{:>width$}",
                        key,
                        val.bold().yellow(),
                        width = STAT_WIDTH - 8
                    )
                })
                .collect::<Vec<_>>()
                .join("\n");
            println!("{line}");
        }

        println!(
            "\
            + {:<STAT_WIDTH$}\t{:>STAT_WIDTH$}\n\
            {:=^FULL_WIDTH$}\n\
            ",
            "Members per batch".bold(),
            self.forest.n_members().to_string().bold().green(),
            "".bold(),
        );
    }
}


fn time_format(millisec: u128) -> String {
    if millisec < 1_000 {
        return format!("  0.{:0>3}s", millisec);
    }
    let sec = millisec / 1_000;
    let millisec = millisec % 1_000;
    if sec < 60 {
        return format!(" {:0>2}.{:0>3}s", sec, millisec);
    }
    let min = sec / 60;
    let sec = sec % 60;
    if min < 60 {
        return format!(" {:0>2}m {:0>2}s", min, sec);
    }
    let hours = min / 60;
    let min = min % 60;
    format!(" {:0>2}h {:0>2}m", hours, min)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::RandomForestBuilder;

    fn blobs(shift: f64) -> Sample {
        let rows = (0..12)
            .map(|i| {
                let x = (i % 6) as f64 * 0.1;
                if i < 6 { [x + shift, x] } else { [x + shift + 3.0, x + 3.0] }
            })
            .collect::<Vec<_>>();
        let target = (0..12).map(|i| if i < 6 { 0 } else { 1 }).collect();
        Sample::from_rows(&rows).unwrap().with_target(target).unwrap()
    }

    #[test]
    fn test_time_format() {
        assert_eq!(time_format(12), "  0.012s");
        assert_eq!(time_format(61_000), " 01m 01s");
    }

    #[test]
    fn test_run_with_log() {
        let old = blobs(0.0);
        let new = blobs(0.2);
        let test = blobs(0.1);

        let trainer = RandomForestBuilder::new().build().unwrap();
        let forest = IncrementalForest::new(trainer, 5).unwrap();

        let path = std::env::temp_dir().join("incforest_logger_test.csv");
        let forest = Logger::new(forest, &test)
            .verbose(false)
            .run_with_log([(&old, 1), (&new, 2)], &path)
            .unwrap();

        assert_eq!(forest.n_batches(), 2);
        assert_eq!(forest.ensemble().weights(), &[1, 1, 1, 1, 1, 2, 2, 2, 2, 2]);

        let log = std::fs::read_to_string(&path).unwrap();
        let lines = log.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], HEADER.trim_end());
        assert!(lines[2].starts_with("2,2,10,"));
        std::fs::remove_file(&path).ok();
    }
}
