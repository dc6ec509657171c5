use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::io::IsTerminal;
use std::sync::Arc;
use uuid::Uuid;

use reedline::{DefaultCompleter, DefaultHinter, DefaultPrompt, DefaultPromptSegment, Reedline, Signal};

use crate::api::ApiClient;
use crate::config::Config;
use crate::error::ApiError;
use crate::navigation::{
    is_external, Navigator, RecordingNavigator, BILLING_PATH, DASHBOARD_PATH, LOGIN_PATH, SIGNUP_PATH,
};
use crate::session::{FileStore, Session};
use crate::types::{AdPlatform, AgentRegister, IncomingMessage, LeadFilter, LeadStatus, Plan};

/// 预编译正则表达式（邮箱格式校验）
static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

/// 终端导航：外部 URL 用浏览器打开，所有目标都记录下来供交互循环检查
#[derive(Default)]
struct TerminalNavigator {
    routes: RecordingNavigator,
}

impl Navigator for TerminalNavigator {
    fn navigate(&self, target: &str) {
        if is_external(target) {
            println!("🌐 正在打开：{}", target);
            if let Err(e) = open::that(target) {
                eprintln!("⚠️ 无法打开浏览器（{}），请手动访问上面的链接", e);
            }
        }
        self.routes.navigate(target);
    }
}

/// 打印帮助信息
fn print_help() {
    println!("🏡 realboost - 房产经纪营销助手");
    println!();
    println!("用法：realboost <命令>");
    println!();
    println!("命令:");
    println!("  login           登录并进入控制台");
    println!("  signup          注册新账号（14 天试用）");
    println!("  dashboard       进入控制台（默认需已登录）");
    println!("  whoami          查看当前登录信息");
    println!("  logout          退出登录");
    println!("  help            显示此帮助信息");
    println!();
    println!("环境变量:");
    println!("  REALBOOST_API_URL   后端地址（默认 http://localhost:8000）");
    println!("  RUST_LOG            日志级别（默认 warn）");
}

fn wire_names<T>(all: &[T], name: fn(&T) -> &'static str) -> String {
    all.iter().map(name).collect::<Vec<_>>().join("/")
}

fn print_dashboard_help() {
    println!("控制台命令:");
    println!("  /leads [状态]          线索列表（{}）", wire_names(LeadStatus::ALL, LeadStatus::as_str));
    println!("  /lead <ID>             线索详情");
    println!("  /messages <ID>         线索对话记录");
    println!("  /qualify <ID> <内容>   让 AI 评估一条线索消息");
    println!("  /stats                 线索统计");
    println!("  /conversations         会话列表");
    println!("  /campaigns             邮件活动");
    println!("  /ads [平台]            广告效果（{}）", wire_names(AdPlatform::ALL, AdPlatform::as_str));
    println!("  /optimize              AI 预算优化建议");
    println!("  /billing               订阅状态");
    println!("  /plans                 套餐列表");
    println!("  /checkout <套餐>       订阅（{}）", wire_names(Plan::ALL, Plan::as_str));
    println!("  /portal                管理订阅");
    println!("  /profile               个人资料");
    println!("  /logout                退出登录");
    println!("  /quit                  退出");
    println!();
}

struct Frontend {
    client: ApiClient,
    navigator: Arc<TerminalNavigator>,
    editor: Reedline,
}

impl Frontend {
    fn new(config: &Config) -> Self {
        let store = Arc::new(FileStore::open(&config.storage.path));
        let session = Arc::new(Session::new(store));
        let navigator = Arc::new(TerminalNavigator::default());
        let client = ApiClient::new(config.api.clone(), session, navigator.clone());

        let editor = Reedline::create()
            .with_hinter(Box::new(DefaultHinter::default()))
            .with_completer(Box::new(DefaultCompleter::default()));

        Frontend {
            client,
            navigator,
            editor,
        }
    }

    /// 读取一行输入，Ctrl-C / Ctrl-D 返回 None
    fn ask(&mut self, label: &str) -> Result<Option<String>> {
        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic(label.to_string()),
            DefaultPromptSegment::Empty,
        );
        match self.editor.read_line(&prompt)? {
            Signal::Success(buffer) => Ok(Some(buffer.trim().to_string())),
            Signal::CtrlC | Signal::CtrlD => Ok(None),
        }
    }

    fn ask_email(&mut self) -> Result<Option<String>> {
        loop {
            let Some(email) = self.ask("邮箱")? else {
                return Ok(None);
            };
            if EMAIL_REGEX.is_match(&email) {
                return Ok(Some(email));
            }
            println!("❌ 邮箱格式不正确：{}", email);
        }
    }

    async fn login(&mut self) -> Result<()> {
        self.navigator.routes.navigate(LOGIN_PATH);
        println!("🔐 登录\n");
        let Some(email) = self.ask_email()? else {
            return Ok(());
        };
        let password = read_password("密码: ")?;

        match self.client.login(&email, &password).await {
            Ok(auth) => self.on_authenticated(&auth.agent).await,
            Err(e) => {
                // 登录失败也会触发 /login 跳转，这里已经在登录页，直接丢弃
                self.navigator.routes.take();
                println!("❌ 登录失败：{}", e);
                Ok(())
            }
        }
    }

    async fn signup(&mut self) -> Result<()> {
        self.navigator.routes.navigate(SIGNUP_PATH);
        println!("📝 注册新账号\n");
        let Some(full_name) = self.ask("姓名")? else {
            return Ok(());
        };
        let Some(email) = self.ask_email()? else {
            return Ok(());
        };
        let password = read_password("密码: ")?;
        if read_password("确认密码: ")? != password {
            println!("❌ 两次输入的密码不一致");
            return Ok(());
        }
        let brokerage = self.ask("经纪公司（可留空）")?.filter(|s| !s.is_empty());
        let location = self.ask("所在城市（可留空）")?.filter(|s| !s.is_empty());

        let data = AgentRegister {
            email,
            password,
            full_name,
            phone: None,
            brokerage,
            location,
        };

        match self.client.register(&data).await {
            Ok(auth) => self.on_authenticated(&auth.agent).await,
            Err(e) => {
                self.navigator.routes.take();
                println!("❌ 注册失败：{}", e);
                Ok(())
            }
        }
    }

    /// 登录 / 注册成功后的回调：切换到控制台
    async fn on_authenticated(&mut self, agent: &Value) -> Result<()> {
        let name = agent
            .get("full_name")
            .and_then(Value::as_str)
            .unwrap_or("经纪人");
        println!("✅ 欢迎，{}！\n", name);
        // 登录 / 注册页的导航记录到此为止，控制台只关心之后的跳转
        self.navigator.routes.take();
        self.navigator.routes.navigate(DASHBOARD_PATH);
        self.dashboard().await
    }

    fn whoami(&self) {
        let session = self.client.session();
        if !session.is_authenticated() {
            println!("🔒 未登录，运行 'realboost login' 登录");
            return;
        }

        match session.agent() {
            Some(agent) => print_agent(&agent),
            None => println!("✅ 已登录（本地没有资料，运行 /profile 刷新）"),
        }
    }

    fn logout(&self) -> Result<()> {
        self.client.logout()?;
        self.navigator.routes.navigate(LOGIN_PATH);
        println!("👋 已退出登录");
        Ok(())
    }

    /// 控制台交互循环
    async fn dashboard(&mut self) -> Result<()> {
        if !self.client.session().is_authenticated() {
            println!("🔒 请先登录：realboost login");
            return Ok(());
        }

        println!("📊 控制台（后端：{}）", self.client.config().base_url);
        println!("输入 /help 查看命令，/quit 退出\n");

        let prompt = DefaultPrompt::default();

        loop {
            let sig = self.editor.read_line(&prompt)?;

            let input = match sig {
                Signal::Success(buffer) => buffer.trim().to_string(),
                Signal::CtrlD => {
                    println!("\n👋 再见！");
                    break;
                }
                Signal::CtrlC => {
                    println!("\n输入 /quit 退出");
                    continue;
                }
            };

            if input.is_empty() {
                continue;
            }

            let parts: Vec<&str> = input.split_whitespace().collect();
            let cmd = parts[0].to_lowercase();

            match cmd.as_str() {
                "/quit" | "/exit" | "quit" | "exit" => {
                    println!("👋 再见！");
                    break;
                }
                "/help" | "/h" | "help" => {
                    print_dashboard_help();
                    continue;
                }
                "/logout" => {
                    self.logout()?;
                    break;
                }
                _ => {}
            }

            if let Err(e) = self.run_command(&cmd, &parts[1..]).await {
                report_error(&e);
            }

            if !self.follow_redirects() {
                break;
            }
        }

        Ok(())
    }

    /// 处理会话边界跳转，返回 false 表示需要离开控制台
    fn follow_redirects(&self) -> bool {
        let mut stay = true;
        for target in self.navigator.routes.take() {
            match target.as_str() {
                LOGIN_PATH => {
                    println!("🔒 会话已过期，请运行 'realboost login' 重新登录");
                    stay = false;
                }
                BILLING_PATH => {
                    println!("💳 该功能需要有效订阅：运行 /plans 查看套餐，/checkout <套餐> 订阅\n");
                }
                _ => {}
            }
        }
        stay
    }

    async fn run_command(&self, cmd: &str, args: &[&str]) -> Result<()> {
        let client = &self.client;
        match cmd {
            "/leads" => {
                let filter = match args.first() {
                    Some(status) => LeadFilter::status(status.parse::<LeadStatus>()?),
                    None => LeadFilter::default(),
                };
                print_leads(&client.list_leads(&filter).await?);
            }
            "/lead" => print_json(&client.get_lead(parse_id(args)?).await?),
            "/messages" => print_json(&client.list_messages(parse_id(args)?).await?),
            "/qualify" => {
                let id = parse_id(args)?;
                let content = args.get(1..).map(|rest| rest.join(" ")).unwrap_or_default();
                if content.is_empty() {
                    anyhow::bail!("用法：/qualify <ID> <内容>");
                }
                print_json(&client.qualify_lead(id, &IncomingMessage::chat(content)).await?);
            }
            "/stats" => print_json(&client.get_stats().await?),
            "/conversations" => print_json(&client.list_conversations().await?),
            "/campaigns" => print_json(&client.list_campaigns().await?),
            "/ads" => {
                let result = match args.first() {
                    Some(platform) => {
                        client
                            .get_platform_performance(platform.parse::<AdPlatform>()?)
                            .await?
                    }
                    None => client.get_ad_performance().await?,
                };
                print_json(&result);
            }
            "/optimize" => print_json(&client.run_optimization().await?),
            "/billing" => print_json(&client.get_billing_status().await?),
            "/plans" => print_json(&client.get_billing_plans().await?),
            "/checkout" => {
                let plan = args
                    .first()
                    .context("用法：/checkout <starter|pro|team>")?
                    .parse::<Plan>()?;
                client.start_checkout(plan).await?;
            }
            "/portal" => {
                client.open_portal().await?;
            }
            "/profile" => {
                let profile = client.get_profile().await?;
                if let Err(e) = client.session().set_agent(&profile) {
                    tracing::warn!(error = %e, "Failed to cache profile");
                }
                print_agent(&profile);
            }
            _ => {
                println!("❌ 未知命令：{}", cmd);
                println!("输入 /help 查看帮助\n");
            }
        }
        Ok(())
    }
}

/// 会话边界错误由 `follow_redirects` 提示，这里只打印其余错误
fn report_error(err: &anyhow::Error) {
    match err.downcast_ref::<ApiError>() {
        Some(api) if api.is_session_boundary() => {}
        Some(api) => match api.status() {
            Some(status) => println!("❌ 请求失败（HTTP {}）：{}\n", status, api),
            None => println!("❌ 请求失败：{}\n", api),
        },
        None => println!("❌ 错误：{}\n", err),
    }
}

/// 无回显读取密码，不经过 reedline，因此不会进入命令历史
fn read_password(prompt: &str) -> Result<String> {
    if !std::io::stdin().is_terminal() {
        anyhow::bail!("无法从非终端输入读取密码");
    }
    let password = rpassword::prompt_password(prompt).context("读取密码失败")?;
    check_password(password)
}

fn check_password(password: String) -> Result<String> {
    if password.trim().is_empty() {
        anyhow::bail!("密码不能为空");
    }
    Ok(password)
}

fn parse_id(args: &[&str]) -> Result<Uuid> {
    let raw = args.first().context("缺少 ID 参数")?;
    raw.parse::<Uuid>()
        .with_context(|| format!("无效的 ID：{}", raw))
}

fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}\n", text),
        Err(_) => println!("{}\n", value),
    }
}

fn print_leads(value: &Value) {
    let Some(leads) = value.as_array() else {
        print_json(value);
        return;
    };

    if leads.is_empty() {
        println!("📭 暂无线索\n");
        return;
    }

    println!("📋 线索列表:");
    println!();
    for lead in leads {
        let first = lead.get("first_name").and_then(Value::as_str).unwrap_or("");
        let last = lead.get("last_name").and_then(Value::as_str).unwrap_or("");
        let status = lead.get("status").and_then(Value::as_str).unwrap_or("-");
        let score = lead.get("ai_score").and_then(Value::as_i64).unwrap_or(0);
        let id = lead.get("id").and_then(Value::as_str).unwrap_or("");

        println!("{} {} [{}] 评分 {}", first, last, status, score);
        println!("   {}", id);
    }
    println!();
}

fn print_agent(agent: &Value) {
    let field = |key: &str| agent.get(key).and_then(Value::as_str).unwrap_or("-").to_string();

    println!("👤 {} <{}>", field("full_name"), field("email"));
    println!("   套餐：{} | 状态：{}", field("subscription_plan"), field("subscription_status"));
    if let Some(trial) = agent.get("trial_ends_at").and_then(Value::as_str) {
        println!("   试用截止：{}", format_timestamp(trial));
    }
    println!();
}

/// 后端时间可能带时区也可能不带，解析失败时原样显示
fn format_timestamp(raw: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format("%Y-%m-%d %H:%M").to_string();
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

/// 主入口函数
pub async fn run_cli() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_help();
        return Ok(());
    }

    let config = Config::load_default()?;
    config.ensure_storage()?;

    let command = args[1].to_lowercase();
    let mut frontend = Frontend::new(&config);

    match command.as_str() {
        "login" => frontend.login().await,
        "signup" | "register" => frontend.signup().await,
        "dashboard" | "d" => frontend.dashboard().await,
        "whoami" => {
            frontend.whoami();
            Ok(())
        }
        "logout" => frontend.logout(),
        "help" | "-h" | "--help" | "h" => {
            print_help();
            Ok(())
        }
        _ => {
            eprintln!("❌ 未知命令：{}", command);
            eprintln!();
            eprintln!("运行 'realboost help' 查看帮助信息");
            std::process::exit(1);
        }
    }
}
