//! Static catalog of the Git commands a learner can pick.

use std::fmt;

/// Grouping used to lay out the command list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Creating or obtaining a repository.
    Start,
    /// Everyday edits to tracked files.
    Work,
    /// Inspecting state and history.
    Examine,
    /// Growing and reshaping history.
    Grow,
    /// Exchanging work with a remote.
    Collaborate,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 5] = [
        Category::Start,
        Category::Work,
        Category::Examine,
        Category::Grow,
        Category::Collaborate,
    ];

    /// Section heading shown above the category's commands.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Category::Start => "项目启动",
            Category::Work => "日常工作",
            Category::Examine => "状态检查",
            Category::Grow => "提交管理",
            Category::Collaborate => "远程协作",
        }
    }
}

/// Display metadata for one command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandMeta {
    /// Stable id fed to the transition function.
    pub id: &'static str,
    /// Display name, e.g. `git add`.
    pub name: &'static str,
    /// One-line summary.
    pub description: &'static str,
    /// Section the command is listed under.
    pub category: Category,
    /// Longer plain-language explanation shown with the AI commentary.
    pub details: &'static str,
}

impl fmt::Display for CommandMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

const fn cmd(
    id: &'static str,
    name: &'static str,
    description: &'static str,
    category: Category,
    details: &'static str,
) -> CommandMeta {
    CommandMeta {
        id,
        name,
        description,
        category,
        details,
    }
}

/// Every command the walkthrough knows, grouped by category.
#[rustfmt::skip]
pub static COMMANDS: [CommandMeta; 17] = [
    cmd("init", "git init", "初始化仓库", Category::Start,
        "在当前文件夹创建一个隐藏的 .git 目录，从此 Git 开始记录你的一举一动。"),
    cmd("clone", "git clone", "克隆远程仓库", Category::Start,
        "从服务器（如 GitHub）完整下载一份项目到你的电脑上。"),
    cmd("add", "git add", "添加到暂存区", Category::Work,
        "把你修改的文件放入“待审区”，准备进行下一步的提交。"),
    cmd("mv", "git mv", "移动或重命名", Category::Work,
        "在 Git 的监控下移动或重命名文件，确保历史记录不丢失。"),
    cmd("restore", "git restore", "撤销修改", Category::Work,
        "觉得写错了？用这个命令把文件恢复到之前的状态。"),
    cmd("rm", "git rm", "删除文件", Category::Work,
        "从工作目录和 Git 的记录中同时移除该文件。"),
    cmd("status", "git status", "查看当前状态", Category::Examine,
        "告诉你哪些文件改了没保存，哪些文件还没被 Git 管起来。"),
    cmd("log", "git log", "查看提交历史", Category::Examine,
        "翻看过去的“日记本”，看看谁在什么时候改了什么。"),
    cmd("diff", "git diff", "对比差异", Category::Examine,
        "精确查看你到底改了哪几行代码。"),
    cmd("commit", "git commit", "提交保存", Category::Grow,
        "给当前的修改拍一张“快照”，永久保存在本地仓库中。"),
    cmd("branch", "git branch", "管理分支", Category::Grow,
        "像平行时空一样创建新的开发线路，互不干扰。"),
    cmd("switch", "git switch", "切换分支", Category::Grow,
        "在不同的开发线路（平行时空）之间来回穿梭。"),
    cmd("merge", "git merge", "合并分支", Category::Grow,
        "把另一个分支的修改“吸纳”到当前分支里。"),
    cmd("reset", "git reset", "回退版本", Category::Grow,
        "让时光倒流，回到过去的某个提交状态。"),
    cmd("fetch", "git fetch", "拉取更新", Category::Collaborate,
        "去服务器看看有没有别人的新进展，但先不合并到你的代码里。"),
    cmd("pull", "git pull", "拉取并合并", Category::Collaborate,
        "一步到位：下载别人的更新并直接合进你的代码。"),
    cmd("push", "git push", "推送上传", Category::Collaborate,
        "把你本地的好东西分享到服务器上，让队友也能看到。"),
];

/// Finds a command by id (`add`) or display name (`git add`), ignoring case
/// and surrounding whitespace.
#[must_use]
pub fn lookup(query: &str) -> Option<&'static CommandMeta> {
    let query = query.trim().to_ascii_lowercase();
    let id = query.strip_prefix("git ").map_or(query.as_str(), str::trim);
    COMMANDS.iter().find(|meta| meta.id == id)
}

/// Commands listed under `category`, in catalog order.
pub fn in_category(category: Category) -> impl Iterator<Item = &'static CommandMeta> {
    COMMANDS.iter().filter(move |meta| meta.category == category)
}
