//! Reply pools for the chat endpoint
//!
//! Maps a predicted intent to one of a fixed set of candidate replies.
//! Pools are validated at construction; an empty pool or empty candidate is
//! a configuration error, never a call-time surprise.

use mimir_core::{Error, Intent, Result};
use rand::Rng;
use std::collections::HashMap;

/// Immutable reply configuration: per-intent candidate pools plus a default
#[derive(Debug)]
pub struct ResponsePool {
    pools: HashMap<Intent, Vec<String>>,
    default_response: String,
}

impl ResponsePool {
    /// Build a validated pool set.
    ///
    /// Intents absent from `pools` fall back to the default response at
    /// selection time; that is allowed. Empty pools or empty candidate
    /// strings are not.
    pub fn new(
        pools: HashMap<Intent, Vec<String>>,
        default_response: impl Into<String>,
    ) -> Result<Self> {
        let default_response = default_response.into();
        if default_response.trim().is_empty() {
            return Err(Error::config("default response must not be empty"));
        }
        for (intent, candidates) in &pools {
            if candidates.is_empty() {
                return Err(Error::config(format!("empty reply pool for '{intent}'")));
            }
            if candidates.iter().any(|c| c.trim().is_empty()) {
                return Err(Error::config(format!(
                    "empty reply candidate in pool for '{intent}'"
                )));
            }
        }
        Ok(Self {
            pools,
            default_response,
        })
    }

    /// The built-in Mimir reply set
    pub fn builtin() -> Result<Self> {
        let mut pools: HashMap<Intent, Vec<String>> = HashMap::new();
        pools.insert(
            Intent::Greeting,
            vec![
                "Chào bạn! Mimir đang nghe bạn đây.".to_string(),
                "Xin chào! Bạn muốn chia sẻ điều gì?".to_string(),
                "Hello, mình ở đây để trò chuyện với bạn!".to_string(),
            ],
        );
        pools.insert(
            Intent::Normal,
            vec![
                "Mình hiểu rồi! Bạn muốn nói thêm gì không?".to_string(),
                "Cảm ơn bạn đã chia sẻ, mọi thứ vẫn ổn chứ?".to_string(),
                "Nghe có vẻ là một ngày bình thường đó.".to_string(),
            ],
        );
        pools.insert(
            Intent::Violence,
            vec![
                "Mình rất tiếc khi nghe điều đó. Bạn có ổn không?".to_string(),
                "Chuyện đó nghiêm trọng đấy… bạn có thể kể chi tiết hơn không?".to_string(),
                "Nếu bạn thấy bất an, hãy nói với thầy cô hoặc người lớn mà bạn tin tưởng nhé."
                    .to_string(),
            ],
        );
        pools.insert(
            Intent::Complain,
            vec![
                "Mình nghe nè… điều đó chắc khiến bạn mệt mỏi lắm.".to_string(),
                "Ai cũng có những ngày tệ… bạn muốn tâm sự thêm không?".to_string(),
                "Nghe có vẻ bạn đã chịu áp lực khá nhiều.".to_string(),
            ],
        );
        pools.insert(
            Intent::AskHelp,
            vec![
                "Bạn cần giúp gì? Mimir luôn sẵn sàng hỗ trợ.".to_string(),
                "Được thôi, bạn đang cần trợ giúp ở phần nào?".to_string(),
                "Bạn muốn mình hỗ trợ điều gì?".to_string(),
            ],
        );
        pools.insert(
            Intent::End,
            vec![
                "Cảm ơn bạn đã chia sẻ! Khi nào cần cứ nhắn Mimir nhé.".to_string(),
                "Chúc bạn một ngày tốt lành!".to_string(),
                "Mimir luôn sẵn sàng khi bạn cần.".to_string(),
            ],
        );

        Self::new(
            pools,
            "Mimir chưa hiểu ý bạn lắm, bạn có thể nói lại được không?",
        )
    }

    /// Pick a reply for the given intent, uniformly at random within its
    /// pool. Intents without a pool get the default response.
    pub fn select<R: Rng>(&self, label: Intent, rng: &mut R) -> &str {
        match self.pools.get(&label) {
            Some(candidates) => &candidates[rng.gen_range(0..candidates.len())],
            None => &self.default_response,
        }
    }

    /// Candidates configured for an intent, if any
    pub fn candidates(&self, label: Intent) -> Option<&[String]> {
        self.pools.get(&label).map(|c| c.as_slice())
    }

    /// The fallback reply
    pub fn default_response(&self) -> &str {
        &self.default_response
    }
}
