use crate::config::KnowledgeConfig;
use crate::index::{KnowledgeBase, MemorySource};

pub(crate) const REGISTRY: &str = "\
# Sections

## 1. Data Structures & Keys (data)
**Impact:** HIGH
**Description:** Choosing structures and naming keys.

## 3. Connection & Performance (conn)
**Impact:** HIGH
**Description:** Pooling, pipelining and timeouts.

## 6. Semantic Search (semantic)
**Impact:** HIGH
**Description:** Similarity queries.

## 7. Semantic Caching (semantic-cache)
**Impact:** MEDIUM
**Description:** Caching LLM responses by meaning.

## 8. Streams & Pub/Sub (stream)
**Impact:** MEDIUM
**Description:** Messaging patterns.

## 11. Observability (observe)
**Impact:** LOW
**Description:** Monitoring and diagnostics.
";

pub(crate) fn rule_doc(title: &str, impact: &str, description: &str, tags: &str, body: &str) -> String {
    format!(
        "---\ntitle: {title}\nimpact: {impact}\nimpactDescription: {description}\ntags: {tags}\n---\n{body}"
    )
}

pub(crate) fn corpus_source() -> MemorySource {
    MemorySource::new()
        .with_registry(REGISTRY)
        .with_rule(
            "conn-pipelining",
            rule_doc(
                "Batch Commands with Pipelining",
                "HIGH",
                "Cuts network round trips",
                "pipeline, performance",
                "## Pipelining\n\nSend many commands in one round trip.\n\n```javascript\nconst p = redis.pipeline();\n```\n\n```python\npipe = r.pipeline()\npipe.set('a', 1)\npipe.execute()\n```\n\n**Note:** Pipelines are not transactions unless wrapped in MULTI.\n",
            ),
        )
        .with_rule(
            "conn-pooling",
            rule_doc(
                "Use Connection Pooling",
                "HIGH",
                "Reduces connection overhead",
                "connection, pool, performance",
                "## Use Connection Pooling\n\nReuse connections across requests.\n\n**Incorrect (new connection per request):**\n\n```python\nr = redis.Redis()\nr.get('k')\n```\n\n**Correct (shared pool):**\n\n```python\npool = redis.ConnectionPool()\nr = redis.Redis(connection_pool=pool)\n```\n\nReference: [Connection pools](https://redis.io/docs/latest/develop/clients/pools-and-muxing/)\n",
            ),
        )
        .with_rule(
            "data-key-naming",
            rule_doc(
                "Use Consistent Key Naming",
                "MEDIUM",
                "Improves maintainability",
                "keys, naming",
                "## Key naming\n\nUse colon-separated namespaces such as `user:1001:profile`.\n\nAvoid a separate pool of ad-hoc names.\n",
            ),
        )
        .with_rule(
            "misc-orphan",
            rule_doc("Orphaned Advice", "LOW", "", "", "## Orphan\n\nNo section claims this.\n"),
        )
        .with_rule(
            "semantic-cache-best-practices",
            rule_doc(
                "Semantic Cache Best Practices",
                "MEDIUM",
                "Avoids redundant LLM calls",
                "llm, cache",
                "## Thresholds\n\nTune the distance threshold.\n\n**Incorrect:**\n\n```python\ncache.check(prompt, distance_threshold=0.9)\n```\n\n**Correct:**\n\n```python\ncache.check(prompt, distance_threshold=0.1)\n```\n\n**Incorrect (no TTL):**\n\n```python\ncache.store(prompt, response)\n```\n",
            ),
        )
        .with_rule(
            "stream-choosing-pattern",
            rule_doc(
                "Choose Streams or Pub/Sub",
                "MEDIUM",
                "Durable delivery",
                "streams, pubsub",
                "## Choosing\n\nStreams persist messages.\n\n```java\njedis.xadd(\"events\", StreamEntryID.NEW_ENTRY, fields);\n```\n",
            ),
        )
}

pub(crate) fn corpus() -> KnowledgeBase {
    KnowledgeBase::from_source(KnowledgeConfig::default(), &corpus_source())
}
