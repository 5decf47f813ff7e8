//! Prompt construction for the generation providers.

use super::{GenerateContentRequest, GenerateRequest};
use crate::catalog::Category;

/// How the content model is briefed for one category
struct ContentBrief {
    /// Who the model should act as
    persona: &'static str,
    /// What it is asked to produce
    task: &'static str,
    /// Name of the Markdown document it returns
    document: &'static str,
    /// Required outline, in order
    sections: &'static [&'static str],
}

const TEMPLATE_GUIDE: &str = "テンプレートガイド";

fn content_brief(category: Category) -> ContentBrief {
    match category {
        Category::Prompt => ContentBrief {
            persona: "AIプロンプトの専門家です",
            task: "実際に販売できるプロンプト集を作成してください",
            document: "プロンプト集",
            sections: &[
                "タイトルと目次",
                "はじめに（使い方説明）",
                "各章に10個ずつのプロンプト（合計50個）",
                "プロンプトは実際にコピペして使える形式で",
                "各プロンプトに「使い方のコツ」を1行追加",
            ],
        },
        Category::Ebook => ContentBrief {
            persona: "ベストセラー作家です",
            task: "電子書籍のコンテンツを作成してください",
            document: "電子書籍",
            sections: &[
                "タイトルページ",
                "目次（5〜7章）",
                "はじめに",
                "各章の本文（各章1000文字程度）",
                "まとめ・あとがき",
            ],
        },
        Category::Checklist => ContentBrief {
            persona: "生産性向上の専門家です",
            task: "チェックリスト/ワークシートを作成してください",
            document: "チェックリスト",
            sections: &[
                "タイトルと概要",
                "使い方ガイド",
                "メインチェックリスト（20〜30項目）",
                "サブチェックリスト（カテゴリ別に3〜5セット）",
                "振り返りシート",
            ],
        },
        Category::Course => ContentBrief {
            persona: "オンライン講師です",
            task: "オンラインコースのカリキュラムと講義スクリプトを作成してください",
            document: "コース教材",
            sections: &[
                "コース概要と学習目標",
                "カリキュラム（5〜7モジュール）",
                "各モジュールの講義スクリプト（各1500文字程度）",
                "演習問題とワーク",
                "まとめと次のステップ",
            ],
        },
        Category::Notion => ContentBrief {
            persona: "Notionテンプレートの専門家です",
            task: "Notionテンプレートの構成案と使い方ガイドを作成してください",
            document: TEMPLATE_GUIDE,
            sections: &[
                "テンプレート概要",
                "データベース構成（プロパティ一覧、ビュー設定）",
                "ページ構成（各ページの役割と使い方）",
                "使い方ガイド（ステップバイステップ）",
                "カスタマイズのヒント",
                "FAQ",
            ],
        },
        Category::Excel => ContentBrief {
            persona: "Excelの専門家です",
            task: "Excelテンプレートの構成案と使い方ガイドを作成してください",
            document: TEMPLATE_GUIDE,
            sections: SHEET_SECTIONS,
        },
        Category::Spreadsheet => ContentBrief {
            persona: "Googleスプレッドシートの専門家です",
            task: "スプレッドシートテンプレートの構成案と使い方ガイドを作成してください",
            document: TEMPLATE_GUIDE,
            sections: SHEET_SECTIONS,
        },
        Category::Powerpoint => ContentBrief {
            persona: "プレゼンテーションの専門家です",
            task: "PowerPointテンプレートの構成案とスライド原稿を作成してください",
            document: TEMPLATE_GUIDE,
            sections: &[
                "テンプレート概要とデザインコンセプト",
                "スライド構成（各スライドの役割）",
                "各スライドの原稿テキスト",
                "使い方ガイド",
                "カスタマイズのヒント",
            ],
        },
        Category::Canva => ContentBrief {
            persona: "Canvaデザインの専門家です",
            task: "Canvaテンプレートの構成案とデザインガイドを作成してください",
            document: TEMPLATE_GUIDE,
            sections: &[
                "テンプレート概要とデザインコンセプト",
                "テンプレート構成（各デザインの用途）",
                "カラーパレットとフォント設定",
                "使い方ガイド（Canvaでの編集方法）",
                "カスタマイズのヒント",
                "活用例",
            ],
        },
        Category::Figma => ContentBrief {
            persona: "Figmaデザインの専門家です",
            task: "Figmaテンプレートの構成案とデザインシステムを作成してください",
            document: TEMPLATE_GUIDE,
            sections: &[
                "テンプレート概要とデザインコンセプト",
                "コンポーネント構成",
                "デザイントークン（色、タイポグラフィ、スペーシング）",
                "使い方ガイド",
                "カスタマイズ方法",
            ],
        },
        Category::Linestamp => ContentBrief {
            persona: "LINEスタンプクリエイターです",
            task: "LINEスタンプのキャラクター設定とセリフ案を作成してください",
            document: "スタンプ企画書",
            sections: &[
                "スタンプセット概要",
                "キャラクター設定（外見、性格、特徴）",
                "スタンプ40個分のセリフ・表情一覧",
                "使用シーン例",
                "制作時の注意点",
            ],
        },
        Category::Icon => ContentBrief {
            persona: "アイコンデザイナーです",
            task: "アイコンセットのデザイン仕様書を作成してください",
            document: "デザイン仕様書",
            sections: &[
                "アイコンセット概要とコンセプト",
                "デザインスタイルガイド",
                "アイコン50個分の一覧（名前と用途）",
                "サイズバリエーション",
                "使用ガイドライン",
            ],
        },
    }
}

const SHEET_SECTIONS: &[&str] = &[
    "テンプレート概要",
    "シート構成（各シートの役割）",
    "入力項目一覧と計算式の説明",
    "使い方ガイド（ステップバイステップ）",
    "カスタマイズ方法",
    "よくある質問",
];

/// Prompt asking for three listing candidates as bare JSON
pub fn listing_prompt(req: &GenerateRequest) -> String {
    let label = req.category.label();
    let range = req.category.price_range();
    let notes = req
        .notes()
        .map(|n| format!("追加の要望: {n}"))
        .unwrap_or_default();

    format!(
        "あなたはデジタル商品販売の専門家です。Gumroadで売れる商品を提案してください。

カテゴリ: {label}
ターゲット: {target}
{notes}

以下の形式でJSON形式で出力してください（説明文は日本語で）:
{{
  \"productNames\": [\"商品名1\", \"商品名2\", \"商品名3\"],
  \"description\": \"購買意欲を刺激する200-300文字の商品説明文\",
  \"suggestedPrice\": {min}から{max}の間の価格（整数）,
  \"tags\": [\"タグ1\", \"タグ2\", \"タグ3\", \"タグ4\", \"タグ5\"]
}}

重要:
- 商品名はキャッチーで検索されやすいものにする
- 説明文は購入者のベネフィットを明確にする
- タグは検索で見つかりやすいキーワードを選ぶ
- JSONのみを出力し、他の説明は不要",
        target = req.target,
        min = range.min,
        max = range.max,
    )
}

/// Prompt asking for the full Markdown deliverable
pub fn content_prompt(req: &GenerateContentRequest) -> String {
    let brief = content_brief(req.category);
    let notes = req
        .notes()
        .map(|n| format!("【追加要望】{n}"))
        .unwrap_or_default();
    let outline = brief
        .sections
        .iter()
        .enumerate()
        .map(|(i, section)| format!("{}. {}", i + 1, section))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "あなたは{persona}。以下の商品情報に基づいて、{task}。

【商品名】{name}
【ターゲット】{target}
{notes}

以下の形式でマークダウン形式の{document}を作成してください：

{outline}

【出力】
マークダウン形式の{document}本文のみを出力してください。",
        persona = brief.persona,
        task = brief.task,
        name = req.product_name,
        target = req.target,
        document = brief.document,
    )
}
