use crate::domain::model::{JobRecord, Source};
use std::collections::HashSet;

/// 去重用的識別鍵：(source, title, company, link)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct DedupKey {
    source: Source,
    title: String,
    company: String,
    link: Option<String>,
}

impl From<&JobRecord> for DedupKey {
    fn from(record: &JobRecord) -> Self {
        Self {
            source: record.source,
            title: record.title.clone(),
            company: record.company.clone(),
            link: record.link.clone(),
        }
    }
}

/// 依出現順序去除重複職缺，只保留第一筆
pub fn aggregate<I>(records: I) -> Vec<JobRecord>
where
    I: IntoIterator<Item = JobRecord>,
{
    let mut seen = HashSet::new();
    let mut unique = Vec::new();

    for record in records {
        if seen.insert(DedupKey::from(&record)) {
            unique.push(record);
        }
    }

    unique
}

/// 依來源分組，鍵的順序為第一次出現的順序
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceGroups {
    groups: Vec<(Source, Vec<JobRecord>)>,
}

impl SourceGroups {
    pub fn get(&self, source: Source) -> Option<&[JobRecord]> {
        self.groups
            .iter()
            .find(|(s, _)| *s == source)
            .map(|(_, records)| records.as_slice())
    }

    pub fn sources(&self) -> impl Iterator<Item = Source> + '_ {
        self.groups.iter().map(|(source, _)| *source)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Source, &[JobRecord])> {
        self.groups
            .iter()
            .map(|(source, records)| (*source, records.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn total_records(&self) -> usize {
        self.groups.iter().map(|(_, records)| records.len()).sum()
    }
}

pub fn group_by_source<'a, I>(records: I) -> SourceGroups
where
    I: IntoIterator<Item = &'a JobRecord>,
{
    let mut groups: Vec<(Source, Vec<JobRecord>)> = Vec::new();

    for record in records {
        match groups.iter_mut().find(|(source, _)| *source == record.source) {
            Some((_, bucket)) => bucket.push(record.clone()),
            None => groups.push((record.source, vec![record.clone()])),
        }
    }

    SourceGroups { groups }
}
