use anyhow::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::models::Record;

/// Table backed by one JSON object per line.
///
/// Rows are read once on open and kept in memory. Inserts append to the file;
/// updates and removals rewrite it through a temporary file. Either way the
/// disk is written before the change becomes visible.
#[derive(Debug)]
pub struct JsonlTable<T> {
    path: PathBuf,
    rows: Vec<T>,
}

impl<T: Record + Serialize + DeserializeOwned> JsonlTable<T> {
    pub fn open_or_create(path: PathBuf) -> Result<Self> {
        if !path.exists() {
            File::create(&path)
                .map_err(|e| anyhow::anyhow!("Failed to create table file {:?}: {}", path, e))?;
        }
        let rows = read_rows(&path)?;
        Ok(Self { path, rows })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, id: u64) -> Option<&T> {
        self.rows.iter().find(|row| row.id() == id)
    }

    pub fn find(&self, mut pred: impl FnMut(&T) -> bool) -> Option<&T> {
        self.rows.iter().find(|row| pred(row))
    }

    fn next_id(&self) -> u64 {
        self.rows.iter().map(Record::id).max().unwrap_or(0) + 1
    }

    /// Build a row with the next free id, persist it and return a copy.
    pub fn insert(&mut self, build: impl FnOnce(u64) -> T) -> Result<T>
    where
        T: Clone,
    {
        let row = build(self.next_id());
        self.append(&row)?;
        self.rows.push(row.clone());
        Ok(row)
    }

    /// Apply `edit` to the row with `id`. `None` when no such row exists.
    pub fn update(&mut self, id: u64, edit: impl FnOnce(&mut T)) -> Result<Option<T>>
    where
        T: Clone,
    {
        let Some(index) = self.rows.iter().position(|row| row.id() == id) else {
            return Ok(None);
        };
        let mut next = self.rows.clone();
        edit(&mut next[index]);
        let updated = next[index].clone();
        self.rewrite(&next)?;
        self.rows = next;
        Ok(Some(updated))
    }

    /// Drop the row with `id`, returning it. `None` when no such row exists.
    pub fn remove(&mut self, id: u64) -> Result<Option<T>>
    where
        T: Clone,
    {
        let Some(index) = self.rows.iter().position(|row| row.id() == id) else {
            return Ok(None);
        };
        let mut next = self.rows.clone();
        let removed = next.remove(index);
        self.rewrite(&next)?;
        self.rows = next;
        Ok(Some(removed))
    }

    fn rewrite(&self, rows: &[T]) -> Result<()> {
        let tmp = self.path.with_extension("jsonl.tmp");
        let file = File::create(&tmp)
            .map_err(|e| anyhow::anyhow!("Failed to create {:?}: {}", tmp, e))?;
        let mut writer = BufWriter::new(file);
        for row in rows {
            serde_json::to_writer(&mut writer, row)
                .map_err(|e| anyhow::anyhow!("Failed to serialize row: {}", e))?;
            writer.write_all(b"\n")
                .map_err(|e| anyhow::anyhow!("Failed to write newline to {:?}: {}", tmp, e))?;
        }
        writer.flush()
            .map_err(|e| anyhow::anyhow!("Failed to flush {:?}: {}", tmp, e))?;
        drop(writer);
        std::fs::rename(&tmp, &self.path)
            .map_err(|e| anyhow::anyhow!("Failed to replace {:?}: {}", self.path, e))?;
        Ok(())
    }

    fn append(&self, item: &T) -> Result<()> {
        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)
            .map_err(|e| anyhow::anyhow!("Failed to open table file {:?}: {}", self.path, e))?;
        let mut writer = BufWriter::new(file);

        serde_json::to_writer(&mut writer, item)
            .map_err(|e| anyhow::anyhow!("Failed to serialize row: {}", e))?;
        writer.write_all(b"\n")
            .map_err(|e| anyhow::anyhow!("Failed to write newline to {:?}: {}", self.path, e))?;
        writer.flush()
            .map_err(|e| anyhow::anyhow!("Failed to flush {:?}: {}", self.path, e))?;
        Ok(())
    }
}

fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file = File::open(path)
        .map_err(|e| anyhow::anyhow!("Failed to open table file {:?}: {}", path, e))?;
    let reader = BufReader::new(file);

    let mut rows = Vec::new();
    for (lineno, line) in reader.lines().enumerate() {
        let line = line
            .map_err(|e| anyhow::anyhow!("Failed to read line from {:?}: {}", path, e))?;
        if line.trim().is_empty() {
            continue;
        }
        let row = serde_json::from_str::<T>(&line).map_err(|e| {
            anyhow::anyhow!("Failed to parse JSON at {:?} line {}: {}", path, lineno + 1, e)
        })?;
        rows.push(row);
    }
    Ok(rows)
}
