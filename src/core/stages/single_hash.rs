//! SingleHash: `crc32(data)~crc32(md5(data))` per integer.

use super::{join, trace, HASH_SEPARATOR};
use crate::core::pipeline::{Inbox, ItemKind, Outbox, Stage};
use crate::core::signer::DataSigner;
use crate::events::SignStep;
use std::sync::Arc;
use std::thread;

/// First signing stage.
///
/// md5 runs on the stage thread, one item at a time. Everything after it
/// runs on a worker per item, so results leave in completion order.
pub struct SingleHash {
    signer: Arc<dyn DataSigner>,
}

impl SingleHash {
    pub fn new(signer: Arc<dyn DataSigner>) -> Self {
        Self { signer }
    }

    fn hash_pair(&self, data: &str, md5: &str, output: &Outbox) -> String {
        let (crc32, crc32_md5) = thread::scope(|scope| {
            let crc32 = scope.spawn(|| {
                let hash = self.signer.crc32(data);
                trace(output, data, SignStep::Crc32, &hash);
                hash
            });
            let crc32_md5 = self.signer.crc32(md5);
            trace(output, data, SignStep::Crc32Md5, &crc32_md5);
            (join(crc32), crc32_md5)
        });

        let result = format!("{crc32}{HASH_SEPARATOR}{crc32_md5}");
        trace(output, data, SignStep::Result, &result);
        result
    }
}

impl Stage for SingleHash {
    fn name(&self) -> &str {
        "single_hash"
    }

    fn run(&self, input: &Inbox, output: &Outbox) {
        thread::scope(|scope| {
            for item in input.iter() {
                let value = match item.into_int() {
                    Ok(value) => value,
                    Err(item) => {
                        output.reject(&item, ItemKind::Int);
                        continue;
                    }
                };

                let data = value.to_string();
                trace(output, &data, SignStep::Data, &data);
                let md5 = self.signer.md5(&data);
                trace(output, &data, SignStep::Md5, &md5);

                scope.spawn(move || {
                    let result = self.hash_pair(&data, &md5, output);
                    output.send(result);
                });
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pipeline::Item;
    use crate::core::stages::test_support::{run_stage, Overlap, Tagging};

    #[test]
    fn emits_crc32_then_crc32_of_md5() {
        let stage = SingleHash::new(Arc::new(Tagging));

        let output = run_stage(stage, vec![Item::Int(7)]);

        assert_eq!(output, vec![Item::from("c(7)~c(m(7))")]);
    }

    #[test]
    fn renders_negative_numbers_in_decimal() {
        let stage = SingleHash::new(Arc::new(Tagging));

        let output = run_stage(stage, vec![Item::Int(-12)]);

        assert_eq!(output, vec![Item::from("c(-12)~c(m(-12))")]);
    }

    #[test]
    fn emits_one_result_per_integer() {
        let stage = SingleHash::new(Arc::new(Tagging));

        let mut output: Vec<String> = run_stage(stage, (0..20).map(Item::Int).collect())
            .into_iter()
            .filter_map(|item| item.into_text().ok())
            .collect();
        output.sort();

        let mut expected: Vec<String> = (0..20).map(|i| format!("c({i})~c(m({i}))")).collect();
        expected.sort();
        assert_eq!(output, expected);
    }

    #[test]
    fn both_hashes_of_one_item_overlap() {
        let signer = Arc::new(Overlap::new(2));
        let stage = SingleHash::new(Arc::clone(&signer) as Arc<dyn DataSigner>);

        let output = run_stage(stage, vec![Item::Int(3)]);

        assert_eq!(output, vec![Item::from("c(3)~c(m(3))")]);
        assert_eq!(signer.peak(), 2);
    }

    #[test]
    fn skips_strings() {
        let stage = SingleHash::new(Arc::new(Tagging));

        let output = run_stage(stage, vec![Item::from("1"), Item::Int(1)]);

        assert_eq!(output, vec![Item::from("c(1)~c(m(1))")]);
    }
}
