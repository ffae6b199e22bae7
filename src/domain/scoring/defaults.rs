//! Built-in aligned rubric.
//!
//! Keyword and pattern tables cover Chinese and English phrasing. Every
//! ladder compares hit counts with strict `>` thresholds; P1 additionally
//! gates on average message length and M1 on message count.

use super::dimension::Dimension;
use super::rubric::{Condition, CueSet, DimensionRubric, Rubric, Rung, Signal};

fn gt(cue: &str, value: f64) -> Condition {
    Condition::cue_gt(cue, value)
}

fn task_understanding() -> DimensionRubric {
    DimensionRubric::new(
        Dimension::P1,
        vec![
            CueSet::keywords(
                "understanding",
                &[
                    "需要", "目标", "要求", "约束", "条件", "背景", "受众", "requirement", "need",
                    "goal", "want to", "should", "constraint", "audience",
                ],
            ),
            CueSet::patterns(
                "detailed",
                &[
                    r"首先.*然后",
                    r"第一.*第二",
                    r"包含.*需要",
                    r"面向.*读者",
                    r"first.*then",
                    r"step \d",
                    r"1\).*2\)",
                    r"目的是",
                ],
            )
            .ignoring_case(),
        ],
        vec![
            Rung::new(
                3,
                Condition::all(vec![
                    Condition::gt(Signal::AverageLength, 150.0),
                    Condition::any(vec![gt("understanding", 5.0), gt("detailed", 2.0)]),
                ]),
            ),
            Rung::new(
                2,
                Condition::all(vec![
                    Condition::gt(Signal::AverageLength, 80.0),
                    Condition::any(vec![gt("understanding", 2.0), gt("detailed", 0.0)]),
                ]),
            ),
            Rung::new(1, Condition::gt(Signal::AverageLength, 30.0)),
        ],
    )
}

fn goal_setting() -> DimensionRubric {
    DimensionRubric::new(
        Dimension::P2,
        vec![
            CueSet::keywords(
                "goal",
                &[
                    "目标", "希望", "想要", "达到", "实现", "完成", "goal", "want", "achieve",
                    "need to", "should be", "能够", "必须",
                ],
            ),
            CueSet::patterns(
                "measurable",
                &[
                    r"\d+%",
                    r"\d+分钟",
                    r"\d+字",
                    r"\d+ words",
                    r"<\d+",
                    r">\d+",
                    r"\d+ms",
                    r"准确率",
                    r"accuracy",
                    r"deadline",
                    r"截止",
                ],
            ),
        ],
        vec![
            Rung::new(3, Condition::all(vec![gt("measurable", 1.0), gt("goal", 2.0)])),
            Rung::new(2, Condition::any(vec![gt("measurable", 0.0), gt("goal", 3.0)])),
            Rung::new(1, gt("goal", 0.0)),
        ],
    )
}

fn strategy_planning() -> DimensionRubric {
    DimensionRubric::new(
        Dimension::P3,
        vec![
            CueSet::keywords(
                "plan",
                &[
                    "计划", "步骤", "先", "然后", "接着", "最后", "策略", "方法", "plan", "step",
                    "first", "then", "next", "finally", "strategy", "approach",
                ],
            ),
            CueSet::patterns(
                "steps",
                &[
                    r"第[一二三四五]",
                    r"step \d",
                    r"\d\)",
                    r"首先.*其次",
                    r"如果.*就",
                    r"if.*then",
                    r"分.*步",
                ],
            ),
            CueSet::patterns(
                "alternatives",
                &[
                    r"或者",
                    r"另一个方法",
                    r"也可以",
                    r"alternatively",
                    r"another way",
                    r"如果不行",
                    r"备选",
                ],
            )
            .ignoring_case(),
        ],
        vec![
            Rung::new(3, Condition::all(vec![gt("steps", 2.0), gt("alternatives", 0.0)])),
            Rung::new(2, Condition::any(vec![gt("steps", 1.0), gt("plan", 3.0)])),
            Rung::new(1, gt("plan", 0.0)),
        ],
    )
}

fn role_definition() -> DimensionRubric {
    DimensionRubric::new(
        Dimension::P4,
        vec![
            CueSet::keywords(
                "role",
                &[
                    "你是", "作为", "你的角色", "扮演", "假设你是", "you are", "act as", "pretend",
                    "your role", "as a", "当作",
                ],
            ),
            CueSet::keywords(
                "boundary",
                &[
                    "你负责", "我负责", "不要", "只给", "请不要", "边界", "分工", "you handle",
                    "i will", "don't", "only", "your job", "my job",
                ],
            ),
            CueSet::patterns(
                "role_assignment",
                &[
                    r"你是一个.*专家",
                    r"作为.*角色",
                    r"you are a.*expert",
                    r"act as a",
                    r"假设你是.*师",
                ],
            )
            .ignoring_case(),
        ],
        vec![
            Rung::new(3, Condition::all(vec![gt("role_assignment", 0.0), gt("boundary", 0.0)])),
            Rung::new(2, Condition::any(vec![gt("role_assignment", 0.0), gt("role", 2.0)])),
            Rung::new(1, Condition::any(vec![gt("role", 0.0), gt("boundary", 0.0)])),
        ],
    )
}

fn process_tracking() -> DimensionRubric {
    DimensionRubric::new(
        Dimension::M1,
        vec![
            CueSet::keywords(
                "progress",
                &[
                    "进度", "完成", "接下来", "目前", "阶段", "继续", "下一步", "progress", "done",
                    "next", "currently", "stage", "continue",
                ],
            ),
            CueSet::patterns(
                "tracking",
                &[
                    r"\d+/\d+",
                    r"第[一二三]部分",
                    r"完成了.*继续",
                    r"step \d",
                    r"回顾",
                    r"总结一下",
                    r"review",
                    r"so far",
                ],
            ),
        ],
        vec![
            Rung::new(
                3,
                Condition::any(vec![
                    gt("tracking", 2.0),
                    Condition::all(vec![
                        Condition::gt(Signal::MessageCount, 20.0),
                        gt("progress", 3.0),
                    ]),
                ]),
            ),
            Rung::new(
                2,
                Condition::all(vec![
                    Condition::gt(Signal::MessageCount, 10.0),
                    gt("progress", 1.0),
                ]),
            ),
            Rung::new(1, Condition::gt(Signal::MessageCount, 3.0)),
        ],
    )
}

fn quality_checking() -> DimensionRubric {
    DimensionRubric::new(
        Dimension::M2,
        vec![
            CueSet::keywords(
                "check",
                &[
                    "不对", "错了", "有问题", "修改", "改一下", "检查", "核实", "wrong", "error",
                    "mistake", "fix", "change", "check", "verify", "incorrect",
                ],
            ),
            CueSet::patterns(
                "correction",
                &[
                    r"这里.*错",
                    r"请修正",
                    r"应该是",
                    r"不是.*而是",
                    r"this is wrong",
                    r"should be",
                    r"please fix",
                    r"逐条检查",
                ],
            )
            .ignoring_case(),
        ],
        vec![
            Rung::new(3, Condition::any(vec![gt("correction", 2.0), gt("check", 5.0)])),
            Rung::new(2, Condition::any(vec![gt("correction", 0.0), gt("check", 2.0)])),
            Rung::new(1, gt("check", 0.0)),
        ],
    )
}

fn trust_calibration() -> DimensionRubric {
    let all_trust = Signal::cue_sum(&["trust", "calibration", "skepticism"]);
    DimensionRubric::new(
        Dimension::M3,
        vec![
            CueSet::keywords(
                "trust",
                &[
                    "信任", "相信", "不确定", "怀疑", "验证", "确认", "可靠", "trust", "believe",
                    "unsure", "doubt", "verify", "confirm", "reliable",
                ],
            ),
            CueSet::patterns(
                "calibration",
                &[
                    r"这个.*信任",
                    r"这方面.*不确定",
                    r"需要.*验证",
                    r"我再查一下",
                    r"这个领域",
                    r"你擅长",
                    r"你的知识",
                    r"i'll verify",
                    r"double check",
                ],
            )
            .ignoring_case(),
            CueSet::patterns(
                "skepticism",
                &[
                    r"真的吗",
                    r"确定吗",
                    r"有把握吗",
                    r"are you sure",
                    r"is this correct",
                    r"让我确认",
                    r"我查一下",
                ],
            )
            .ignoring_case(),
        ],
        vec![
            Rung::new(3, Condition::all(vec![gt("calibration", 1.0), gt("skepticism", 0.0)])),
            Rung::new(2, Condition::gt(all_trust.clone(), 3.0)),
            Rung::new(1, Condition::gt(all_trust, 0.0)),
        ],
    )
}

fn quality_evaluation() -> DimensionRubric {
    DimensionRubric::new(
        Dimension::E1,
        vec![
            CueSet::keywords(
                "judgment",
                &[
                    "好", "不好", "可以", "不行", "满意", "质量", "评价", "分数", "good", "bad",
                    "okay", "satisfied", "quality", "rate", "score",
                ],
            ),
            CueSet::patterns(
                "reasoned",
                &[
                    r"因为.*所以",
                    r"这个.*好.*因为",
                    r"但是.*可以改进",
                    r"优点.*缺点",
                    r"because",
                    r"but.*could be better",
                    r"pros.*cons",
                    r"不错.*但",
                ],
            )
            .ignoring_case(),
            CueSet::patterns(
                "multi_criteria",
                &[
                    r"\d+/\d+",
                    r"准确性.*完整性",
                    r"从.*角度",
                    r"第一.*第二",
                    r"accuracy.*completeness",
                    r"in terms of",
                ],
            ),
        ],
        vec![
            Rung::new(
                3,
                Condition::any(vec![
                    gt("multi_criteria", 0.0),
                    Condition::all(vec![gt("reasoned", 1.0), gt("judgment", 2.0)]),
                ]),
            ),
            Rung::new(2, gt("reasoned", 0.0)),
            Rung::new(1, gt("judgment", 0.0)),
        ],
    )
}

fn risk_assessment() -> DimensionRubric {
    DimensionRubric::new(
        Dimension::E2,
        vec![
            CueSet::keywords(
                "risk",
                &[
                    "风险", "问题", "危险", "后果", "安全", "万一", "如果出错", "risk", "problem",
                    "danger", "consequence", "safe", "what if", "if wrong",
                ],
            ),
            CueSet::patterns(
                "risk_reasoning",
                &[
                    r"如果.*会",
                    r"万一.*怎么",
                    r"可能.*导致",
                    r"注意.*安全",
                    r"if.*might",
                    r"could.*cause",
                    r"be careful",
                    r"潜在",
                ],
            )
            .ignoring_case(),
        ],
        vec![
            Rung::new(
                3,
                Condition::any(vec![
                    gt("risk_reasoning", 2.0),
                    Condition::all(vec![gt("risk", 3.0), gt("risk_reasoning", 0.0)]),
                ]),
            ),
            Rung::new(2, Condition::any(vec![gt("risk_reasoning", 0.0), gt("risk", 1.0)])),
            Rung::new(1, gt("risk", 0.0)),
        ],
    )
}

fn capability_judgment() -> DimensionRubric {
    DimensionRubric::new(
        Dimension::E3,
        vec![
            CueSet::keywords(
                "capability",
                &[
                    "你能",
                    "你擅长",
                    "你的局限",
                    "我自己来",
                    "你可能不知道",
                    "知识截止",
                    "can you",
                    "you are good at",
                    "limitation",
                    "i'll do",
                    "you might not know",
                ],
            ),
            CueSet::patterns(
                "limits",
                &[
                    r"这个.*超出",
                    r"你的知识.*到",
                    r"最新.*可能不知道",
                    r"这部分.*我来",
                    r"beyond your",
                    r"knowledge cutoff",
                    r"this part.*myself",
                ],
            )
            .ignoring_case(),
        ],
        vec![
            Rung::new(
                3,
                Condition::any(vec![
                    gt("limits", 1.0),
                    Condition::all(vec![gt("capability", 2.0), gt("limits", 0.0)]),
                ]),
            ),
            Rung::new(2, Condition::any(vec![gt("limits", 0.0), gt("capability", 1.0)])),
            Rung::new(1, gt("capability", 0.0)),
        ],
    )
}

fn strategy_adjustment() -> DimensionRubric {
    DimensionRubric::new(
        Dimension::R1,
        vec![
            CueSet::keywords(
                "adjustment",
                &[
                    "换个方式",
                    "重新",
                    "调整",
                    "改变",
                    "尝试",
                    "另一个方法",
                    "try again",
                    "different",
                    "adjust",
                    "change",
                    "another way",
                ],
            ),
            CueSet::patterns(
                "deliberate_change",
                &[
                    r"上次.*问题",
                    r"这次我",
                    r"换个角度",
                    r"之前.*不好",
                    r"last time",
                    r"this time",
                    r"different approach",
                    r"前面.*现在",
                ],
            )
            .ignoring_case(),
        ],
        vec![
            Rung::new(
                3,
                Condition::any(vec![
                    gt("deliberate_change", 1.0),
                    Condition::all(vec![gt("adjustment", 2.0), gt("deliberate_change", 0.0)]),
                ]),
            ),
            Rung::new(
                2,
                Condition::any(vec![gt("deliberate_change", 0.0), gt("adjustment", 1.0)]),
            ),
            Rung::new(1, gt("adjustment", 0.0)),
        ],
    )
}

fn tool_switching() -> DimensionRubric {
    DimensionRubric::new(
        Dimension::R2,
        vec![
            CueSet::keywords(
                "tools",
                &[
                    "google",
                    "bing",
                    "搜索",
                    "查一下",
                    "其他工具",
                    "测试",
                    "运行代码",
                    "search",
                    "look up",
                    "other tool",
                    "test",
                    "run",
                    "verify externally",
                ],
            ),
            CueSet::patterns(
                "switching",
                &[
                    r"我.*google",
                    r"搜索.*验证",
                    r"运行.*测试",
                    r"其他.*AI",
                    r"claude|chatgpt|gpt|文心",
                    r"我去.*查",
                    r"i'll.*search",
                ],
            )
            .ignoring_case(),
        ],
        vec![
            Rung::new(
                3,
                Condition::any(vec![
                    gt("switching", 2.0),
                    Condition::all(vec![gt("tools", 3.0), gt("switching", 0.0)]),
                ]),
            ),
            Rung::new(2, Condition::any(vec![gt("switching", 0.0), gt("tools", 1.0)])),
            Rung::new(1, gt("tools", 0.0)),
        ],
    )
}

impl Rubric {
    /// The aligned twelve-dimension heuristic rubric, every dimension scored
    /// per message.
    pub fn aligned() -> Self {
        Self::new(vec![
            task_understanding(),
            goal_setting(),
            strategy_planning(),
            role_definition(),
            process_tracking(),
            quality_checking(),
            trust_calibration(),
            quality_evaluation(),
            risk_assessment(),
            capability_judgment(),
            strategy_adjustment(),
            tool_switching(),
        ])
    }
}

impl Default for Rubric {
    fn default() -> Self {
        Self::aligned()
    }
}
