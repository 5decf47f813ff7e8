//! Template output used when no provider is configured or a provider
//! reply cannot be used.

use super::{GenerateContentRequest, GenerateRequest, GenerateResponse};

/// Longest product-name prefix kept in a download filename (characters)
const FILENAME_STEM_LIMIT: usize = 50;

/// Deterministic listing built from the category and target
pub fn fallback_listing(req: &GenerateRequest) -> GenerateResponse {
    let label = req.category.label();
    let target = req.target.as_str();

    GenerateResponse {
        product_names: vec![
            format!("【保存版】{target}のための{label}"),
            format!("{target}必見！即実践{label}"),
            format!("初心者OK！{target}向け{label}完全ガイド"),
        ],
        description: format!(
            "「{target}」の方に向けた{label}です。\n\n\
             このテンプレートを使えば、面倒な作業を大幅に短縮できます。\n\
             初心者でもすぐに使い始められるよう、わかりやすい説明付き。\n\n\
             【含まれる内容】\n\
             ・すぐに使えるテンプレート一式\n\
             ・カスタマイズガイド\n\
             ・活用事例集"
        ),
        suggested_price: req.category.price_range().midpoint(),
        tags: vec![
            target.to_string(),
            label.to_string(),
            "テンプレート".to_string(),
            "時短".to_string(),
            "初心者向け".to_string(),
        ],
    }
}

/// Skeleton deliverable in Markdown
pub fn fallback_content(req: &GenerateContentRequest) -> String {
    let name = req.product_name.as_str();
    let label = req.category.label();
    let target = req.target.as_str();

    format!(
        "# {name}

## はじめに

この{label}は「{target}」の方に向けて作成しました。

## 目次

1. 第1章：基本の使い方
2. 第2章：応用テクニック
3. 第3章：よくある質問

## 第1章：基本の使い方

ここに基本的な使い方の説明が入ります。

### ポイント1
- 項目A
- 項目B
- 項目C

### ポイント2
- 項目D
- 項目E
- 項目F

## 第2章：応用テクニック

応用的な使い方を紹介します。

### テクニック1

具体的な手順を説明...

### テクニック2

別のアプローチを説明...

## 第3章：よくある質問

**Q: 〇〇はどうすればいいですか？**

A: 〇〇の手順で対応できます。

**Q: △△の場合はどうなりますか？**

A: △△の場合は、□□を試してください。

---

ご購入ありがとうございました。
"
    )
}

/// Download filename for a product's content.
///
/// Spaces and slashes become underscores and the stem is cut to
/// [`FILENAME_STEM_LIMIT`] characters before the `.md` suffix.
pub fn content_filename(product_name: &str) -> String {
    let stem: String = product_name
        .chars()
        .map(|c| if c == ' ' || c == '/' { '_' } else { c })
        .take(FILENAME_STEM_LIMIT)
        .collect();
    format!("{stem}.md")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Category;

    #[test]
    fn test_listing_has_three_names_and_midpoint_price() {
        for category in Category::ALL {
            let req = GenerateRequest {
                category,
                target: "学生".to_string(),
                additional_notes: None,
            };
            let listing = fallback_listing(&req);
            assert_eq!(listing.product_names.len(), 3);
            assert_eq!(listing.suggested_price, category.price_range().midpoint());
            assert!(listing.product_names[0].contains(category.label()));
            assert_eq!(listing.tags[0], "学生");
        }
    }

    #[test]
    fn test_content_mentions_name_label_and_target() {
        let req = GenerateContentRequest {
            category: Category::Checklist,
            product_name: "引っ越しチェックリスト".to_string(),
            target: "新社会人".to_string(),
            additional_notes: None,
        };
        let content = fallback_content(&req);
        assert!(content.starts_with("# 引っ越しチェックリスト\n"));
        assert!(content.contains("このチェックリスト/ワークシートは「新社会人」の方に向けて"));
        assert!(content.ends_with("ご購入ありがとうございました。\n"));
    }

    #[test]
    fn test_filename_replaces_separators() {
        assert_eq!(content_filename("Notion / 家計簿 テンプレ"), "Notion___家計簿_テンプレ.md");
    }

    #[test]
    fn test_filename_truncates_by_characters() {
        let long_name = "あ".repeat(80);
        let filename = content_filename(&long_name);
        assert_eq!(filename.chars().count(), 50 + ".md".len());
        assert!(filename.ends_with(".md"));
    }
}
