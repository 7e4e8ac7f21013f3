//! Route 53 change-batch XML construction and record-set extraction
//!
//! The API speaks a small, fixed XML vocabulary, so this module builds and
//! reads exactly those documents instead of pulling in a full XML stack.

/// Change action in a `ChangeResourceRecordSetsRequest`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ChangeAction {
    Create,
    Delete,
}

impl ChangeAction {
    fn as_str(self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Delete => "DELETE",
        }
    }
}

/// One change entry: a TXT record set with its values.
#[derive(Debug, Clone)]
pub(crate) struct Change {
    pub action: ChangeAction,
    /// FQDN with trailing dot.
    pub name: String,
    pub ttl: u32,
    /// Values as stored, including surrounding double quotes.
    pub values: Vec<String>,
}

/// A record set extracted from a `ListResourceRecordSetsResponse`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RecordSet {
    /// FQDN with trailing dot.
    pub name: String,
    pub record_type: String,
    pub ttl: Option<u32>,
    /// Values as stored, including surrounding double quotes.
    pub values: Vec<String>,
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn unescape_text(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

/// Build a `ChangeResourceRecordSetsRequest` document.
pub(crate) fn build_change_batch(changes: &[Change]) -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str(
        "<ChangeResourceRecordSetsRequest xmlns=\"https://route53.amazonaws.com/doc/2013-04-01/\">\n",
    );
    xml.push_str("  <ChangeBatch>\n    <Changes>\n");

    for change in changes {
        xml.push_str("      <Change>\n");
        xml.push_str(&format!("        <Action>{}</Action>\n", change.action.as_str()));
        xml.push_str("        <ResourceRecordSet>\n");
        xml.push_str(&format!(
            "          <Name>{}</Name>\n",
            escape_text(&change.name)
        ));
        xml.push_str("          <Type>TXT</Type>\n");
        xml.push_str(&format!("          <TTL>{}</TTL>\n", change.ttl));
        xml.push_str("          <ResourceRecords>\n");
        for value in &change.values {
            xml.push_str("            <ResourceRecord>\n");
            xml.push_str(&format!(
                "              <Value>{}</Value>\n",
                escape_text(value)
            ));
            xml.push_str("            </ResourceRecord>\n");
        }
        xml.push_str("          </ResourceRecords>\n");
        xml.push_str("        </ResourceRecordSet>\n");
        xml.push_str("      </Change>\n");
    }

    xml.push_str("    </Changes>\n  </ChangeBatch>\n");
    xml.push_str("</ChangeResourceRecordSetsRequest>");
    xml
}

/// All inner bodies of `<tag>...</tag>` occurrences, non-nested.
fn extract_all<'a>(xml: &'a str, tag: &str) -> Vec<&'a str> {
    let open = format!("<{tag}>");
    let close = format!("</{tag}>");
    let mut out = Vec::new();
    let mut rest = xml;
    while let Some(start) = rest.find(&open) {
        let body_start = start + open.len();
        let Some(end) = rest[body_start..].find(&close) else {
            break;
        };
        out.push(&rest[body_start..body_start + end]);
        rest = &rest[body_start + end + close.len()..];
    }
    out
}

/// Inner body of the first `<tag>...</tag>` occurrence.
pub(crate) fn extract_tag(xml: &str, tag: &str) -> Option<String> {
    extract_all(xml, tag)
        .first()
        .map(|s| unescape_text(s.trim()))
}

/// Extract record sets from a `ListResourceRecordSetsResponse` document.
pub(crate) fn parse_record_sets(xml: &str) -> Vec<RecordSet> {
    extract_all(xml, "ResourceRecordSet")
        .into_iter()
        .filter_map(|block| {
            let name = extract_tag(block, "Name")?;
            let record_type = extract_tag(block, "Type")?;
            let ttl = extract_tag(block, "TTL").and_then(|t| t.parse().ok());
            let values = extract_all(block, "Value")
                .into_iter()
                .map(|v| unescape_text(v.trim()))
                .collect();
            Some(RecordSet {
                name,
                record_type,
                ttl,
                values,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn change_batch_create() {
        let xml = build_change_batch(&[Change {
            action: ChangeAction::Create,
            name: "_acme-challenge.example.com.".into(),
            ttl: 600,
            values: vec!["\"digest-value\"".into()],
        }]);

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<Action>CREATE</Action>"));
        assert!(xml.contains("<Name>_acme-challenge.example.com.</Name>"));
        assert!(xml.contains("<Type>TXT</Type>"));
        assert!(xml.contains("<TTL>600</TTL>"));
        assert!(xml.contains("<Value>\"digest-value\"</Value>"));
    }

    #[test]
    fn change_batch_delete_multiple_values() {
        let xml = build_change_batch(&[Change {
            action: ChangeAction::Delete,
            name: "_acme-challenge.example.com.".into(),
            ttl: 300,
            values: vec!["\"one\"".into(), "\"two\"".into()],
        }]);

        assert!(xml.contains("<Action>DELETE</Action>"));
        assert_eq!(xml.matches("<ResourceRecord>").count(), 2);
    }

    #[test]
    fn change_batch_escapes_values() {
        let xml = build_change_batch(&[Change {
            action: ChangeAction::Create,
            name: "x.example.com.".into(),
            ttl: 600,
            values: vec!["\"a&b<c\"".into()],
        }]);
        assert!(xml.contains("<Value>\"a&amp;b&lt;c\"</Value>"));
    }

    #[test]
    fn parse_list_response() {
        let xml = r#"<?xml version="1.0"?>
<ListResourceRecordSetsResponse xmlns="https://route53.amazonaws.com/doc/2013-04-01/">
  <ResourceRecordSets>
    <ResourceRecordSet>
      <Name>_acme-challenge.example.com.</Name>
      <Type>TXT</Type>
      <TTL>600</TTL>
      <ResourceRecords>
        <ResourceRecord><Value>"digest-one"</Value></ResourceRecord>
        <ResourceRecord><Value>"digest-two"</Value></ResourceRecord>
      </ResourceRecords>
    </ResourceRecordSet>
    <ResourceRecordSet>
      <Name>example.com.</Name>
      <Type>A</Type>
      <TTL>300</TTL>
      <ResourceRecords>
        <ResourceRecord><Value>203.0.113.7</Value></ResourceRecord>
      </ResourceRecords>
    </ResourceRecordSet>
  </ResourceRecordSets>
  <IsTruncated>false</IsTruncated>
</ListResourceRecordSetsResponse>"#;

        let sets = parse_record_sets(xml);
        assert_eq!(sets.len(), 2);
        assert_eq!(sets[0].name, "_acme-challenge.example.com.");
        assert_eq!(sets[0].record_type, "TXT");
        assert_eq!(sets[0].ttl, Some(600));
        assert_eq!(
            sets[0].values,
            vec!["\"digest-one\"".to_string(), "\"digest-two\"".to_string()]
        );
        assert_eq!(sets[1].record_type, "A");
    }

    #[test]
    fn parse_empty_response() {
        let xml = "<ListResourceRecordSetsResponse><ResourceRecordSets/></ListResourceRecordSetsResponse>";
        assert!(parse_record_sets(xml).is_empty());
    }

    #[test]
    fn extract_tag_unescapes() {
        let xml = "<Message>rate &amp; limit</Message>";
        assert_eq!(extract_tag(xml, "Message").as_deref(), Some("rate & limit"));
    }
}
