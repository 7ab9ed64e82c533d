//! Hand-written collaborator fakes for unit tests

use anyhow::{Result, anyhow, bail};
use std::cell::RefCell;
use std::collections::VecDeque;

use super::{MapsProvider, PageScraper, SearchProvider, TextGenerator, WeatherProvider};
use crate::models::{MapInfo, PlaceInfo, Turn, WeatherInfo};

/// Replays canned replies in call order and records every prompt it saw
#[derive(Default)]
pub struct ScriptedGenerator {
    replies: RefCell<VecDeque<Result<String, String>>>,
    pub calls: RefCell<Vec<(String, String, usize)>>,
}

impl ScriptedGenerator {
    pub fn new(replies: Vec<Result<&str, &str>>) -> Self {
        Self {
            replies: RefCell::new(
                replies
                    .into_iter()
                    .map(|r| r.map(str::to_string).map_err(str::to_string))
                    .collect(),
            ),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl TextGenerator for ScriptedGenerator {
    fn generate(&self, system_prompt: &str, user_prompt: &str, history: &[Turn]) -> Result<String> {
        self.calls.borrow_mut().push((
            system_prompt.to_string(),
            user_prompt.to_string(),
            history.len(),
        ));
        match self.replies.borrow_mut().pop_front() {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(message)) => Err(anyhow!(message)),
            None => bail!("no scripted reply left"),
        }
    }
}

/// Search that fails for queries containing a marker and echoes links otherwise
pub struct FlakySearch {
    pub fail_marker: &'static str,
}

impl SearchProvider for FlakySearch {
    fn search(&self, query: &str, num_results: usize) -> Result<Vec<String>> {
        if query.contains(self.fail_marker) {
            bail!("search backend unavailable");
        }
        Ok((0..num_results)
            .map(|i| format!("https://example.com/{}/{i}", query.replace(' ', "-")))
            .collect())
    }
}

/// Scraper returning one place per URL, failing for URLs containing a marker
pub struct EchoScraper {
    pub fail_marker: Option<&'static str>,
}

impl PageScraper for EchoScraper {
    fn scrape(&self, url: &str) -> Result<Vec<PlaceInfo>> {
        if let Some(marker) = self.fail_marker {
            if url.contains(marker) {
                bail!("scrape rejected");
            }
        }
        Ok(vec![PlaceInfo::new(format!("Place from {url}"), "Worth a visit")])
    }
}

/// Every collaborator role, always failing
pub struct Broken;

impl SearchProvider for Broken {
    fn search(&self, _query: &str, _num_results: usize) -> Result<Vec<String>> {
        bail!("search down")
    }
}

impl PageScraper for Broken {
    fn scrape(&self, _url: &str) -> Result<Vec<PlaceInfo>> {
        bail!("scrape down")
    }
}

impl WeatherProvider for Broken {
    fn get_forecast(&self, _location: &str) -> Result<WeatherInfo> {
        bail!("weather down")
    }
}

impl MapsProvider for Broken {
    fn get_location_info(&self, _location: &str) -> Result<MapInfo> {
        bail!("maps down")
    }
}

impl TextGenerator for Broken {
    fn generate(
        &self,
        _system_prompt: &str,
        _user_prompt: &str,
        _history: &[Turn],
    ) -> Result<String> {
        bail!("llm down")
    }
}

/// Text generator that panics, standing in for a defect inside a collaborator
pub struct PanickingGenerator;

impl TextGenerator for PanickingGenerator {
    fn generate(
        &self,
        _system_prompt: &str,
        _user_prompt: &str,
        _history: &[Turn],
    ) -> Result<String> {
        panic!("generator exploded")
    }
}
